use serde::Serialize;

use crate::model::{coord_range, Coord, Direction, Grid, GridError};

/// Occupied-cell counts along the four edges of a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingCounts {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl RingCounts {
    pub fn all_positive(&self) -> bool {
        self.top > 0 && self.bottom > 0 && self.left > 0 && self.right > 0
    }
}

struct Segment {
    start: Coord,
    count: usize,
    direction: Direction,
}

/// Counts occupied cells along each of the four outer edges.
pub fn outer_ring_counts(grid: &Grid) -> Result<RingCounts, GridError> {
    let (height, width) = (grid.height(), grid.width());
    ring_counts(
        grid,
        [
            Segment {
                start: Coord::new(0, 0),
                count: width,
                direction: Direction::Horizontal,
            },
            Segment {
                start: Coord::new(height - 1, 0),
                count: width,
                direction: Direction::Horizontal,
            },
            Segment {
                start: Coord::new(0, 0),
                count: height,
                direction: Direction::Vertical,
            },
            Segment {
                start: Coord::new(0, width - 1),
                count: height,
                direction: Direction::Vertical,
            },
        ],
    )
}

/// Same counts one cell inward, a shape diagnostic. Errors on boards
/// narrower or shorter than 3, where no inner ring exists.
pub fn inner_ring_counts(grid: &Grid) -> Result<RingCounts, GridError> {
    let (height, width) = (grid.height(), grid.width());
    if height < 3 || width < 3 {
        return Err(GridError::RingOutOfBounds {
            row: 1,
            col: 1,
            count: 0,
            height,
            width,
        });
    }
    ring_counts(
        grid,
        [
            Segment {
                start: Coord::new(1, 1),
                count: width - 2,
                direction: Direction::Horizontal,
            },
            Segment {
                start: Coord::new(height - 2, 1),
                count: width - 2,
                direction: Direction::Horizontal,
            },
            Segment {
                start: Coord::new(1, 1),
                count: height - 2,
                direction: Direction::Vertical,
            },
            Segment {
                start: Coord::new(1, width - 2),
                count: height - 2,
                direction: Direction::Vertical,
            },
        ],
    )
}

fn ring_counts(grid: &Grid, segments: [Segment; 4]) -> Result<RingCounts, GridError> {
    let mut counts = [0usize; 4];
    for (slot, segment) in counts.iter_mut().zip(&segments) {
        *slot = segment_count(grid, segment)?;
    }
    Ok(RingCounts {
        top: counts[0],
        bottom: counts[1],
        left: counts[2],
        right: counts[3],
    })
}

fn segment_count(grid: &Grid, segment: &Segment) -> Result<usize, GridError> {
    let coords = coord_range(segment.start, segment.count, segment.direction, grid.size())
        .ok_or(GridError::RingOutOfBounds {
            row: segment.start.row,
            col: segment.start.col,
            count: segment.count,
            height: grid.height(),
            width: grid.width(),
        })?;
    Ok(coords.iter().filter(|c| grid.is_occupied(**c)).count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Size;
    use assert_matches::assert_matches;

    const REFERENCE: &str = "111110000101010000101011111101010000111110000000000000000000000000000000000000000000000000000000000";

    #[test]
    fn outer_counts_on_reference_board() {
        let grid = Grid::from_occupancy(REFERENCE, Size::new(11, 9).unwrap()).unwrap();
        let counts = outer_ring_counts(&grid).unwrap();
        assert_eq!(
            counts,
            RingCounts {
                top: 5,
                bottom: 0,
                left: 5,
                right: 1
            }
        );
        assert!(!counts.all_positive());
    }

    #[test]
    fn outer_counts_on_tight_board() {
        let tight = &REFERENCE[..45];
        let grid = Grid::from_occupancy(tight, Size::new(5, 9).unwrap()).unwrap();
        let counts = outer_ring_counts(&grid).unwrap();
        assert_eq!(
            counts,
            RingCounts {
                top: 5,
                bottom: 5,
                left: 5,
                right: 1
            }
        );
        assert!(counts.all_positive());
    }

    #[test]
    fn inner_counts_one_cell_inward() {
        let tight = &REFERENCE[..45];
        let grid = Grid::from_occupancy(tight, Size::new(5, 9).unwrap()).unwrap();
        assert_eq!(
            inner_ring_counts(&grid).unwrap(),
            RingCounts {
                top: 2,
                bottom: 2,
                left: 0,
                right: 1
            }
        );
    }

    #[test]
    fn inner_counts_need_at_least_three_by_three() {
        let grid = Grid::empty(Size::new(2, 5).unwrap());
        assert_matches!(inner_ring_counts(&grid), Err(GridError::RingOutOfBounds { .. }));
        let grid = Grid::empty(Size::new(5, 2).unwrap());
        assert_matches!(inner_ring_counts(&grid), Err(GridError::RingOutOfBounds { .. }));
        let grid = Grid::empty(Size::new(3, 3).unwrap());
        assert_matches!(
            inner_ring_counts(&grid),
            Ok(RingCounts {
                top: 0,
                bottom: 0,
                left: 0,
                right: 0
            })
        );
    }

    #[test]
    fn outer_counts_on_single_cell_board() {
        let grid = Grid::from_occupancy("1", Size::new(1, 1).unwrap()).unwrap();
        assert_eq!(
            outer_ring_counts(&grid).unwrap(),
            RingCounts {
                top: 1,
                bottom: 1,
                left: 1,
                right: 1
            }
        );
    }
}
