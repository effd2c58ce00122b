use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

/// Structural errors raised while building or inspecting a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("board size must have positive height and width, got {height}x{width}")]
    EmptySize { height: usize, width: usize },

    #[error("occupancy length {actual} does not match {height}x{width} = {expected}")]
    OccupancyLength {
        actual: usize,
        expected: usize,
        height: usize,
        width: usize,
    },

    #[error("occupancy may contain only '0' and '1', found {found:?} at offset {offset}")]
    OccupancyChar { found: char, offset: usize },

    #[error(
        "ring segment at ({row}, {col}) spanning {count} cells leaves the {height}x{width} board"
    )]
    RingOutOfBounds {
        row: usize,
        col: usize,
        count: usize,
        height: usize,
        width: usize,
    },
}

/// Board dimensions. Both sides are positive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    height: usize,
    width: usize,
}

impl Size {
    pub fn new(height: usize, width: usize) -> Result<Self, GridError> {
        if height == 0 || width == 0 {
            return Err(GridError::EmptySize { height, width });
        }
        Ok(Self { height, width })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn area(&self) -> usize {
        self.height * self.width
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.height && coord.col < self.width
    }
}

/// A cell position, ordered lexicographically by (row, col).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Shifts by a signed offset; `None` when either component would go
    /// negative. Bounds against a `Size` are the caller's concern.
    pub fn offset_by(self, dr: isize, dc: isize) -> Option<Coord> {
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        if row < 0 || col < 0 {
            return None;
        }
        Some(Coord {
            row: row as usize,
            col: col as usize,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Horizontal,
    Vertical,
}

impl Direction {
    pub fn reverse(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }

    /// Per-cell step as (row delta, col delta).
    pub(crate) fn step(self) -> (usize, usize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
        }
    }
}

/// A candidate equation: start cell plus orientation, not yet applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

impl Placement {
    pub fn new(row: usize, col: usize, direction: Direction) -> Self {
        Self {
            row,
            col,
            direction,
        }
    }

    pub fn start(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    /// The ordered run this placement would occupy, or `None` if it leaves
    /// the board.
    pub fn coords(&self, equation_length: usize, size: Size) -> Option<Vec<Coord>> {
        coord_range(self.start(), equation_length, self.direction, size)
    }
}

/// The ordered sequence of `count` cells stepping from `start` in
/// `direction`. `None` when any produced cell falls outside the board, or
/// when `count` is zero.
pub fn coord_range(
    start: Coord,
    count: usize,
    direction: Direction,
    size: Size,
) -> Option<Vec<Coord>> {
    if count == 0 {
        return None;
    }
    let (dr, dc) = direction.step();
    let end = Coord::new(start.row + dr * (count - 1), start.col + dc * (count - 1));
    if !size.contains(start) || !size.contains(end) {
        return None;
    }
    Some(
        (0..count)
            .map(|i| Coord::new(start.row + dr * i, start.col + dc * i))
            .collect(),
    )
}

/// An immutable occupancy board. Equality and hashing go by the occupancy
/// content, which makes a `Grid` directly usable as a memoization key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    cells: Vec<bool>,
    height: usize,
    width: usize,
}

impl Grid {
    pub fn empty(size: Size) -> Self {
        Self {
            cells: vec![false; size.area()],
            height: size.height(),
            width: size.width(),
        }
    }

    /// Parses a row-major `'0'`/`'1'` string. Rejects length mismatches and
    /// non-binary characters.
    pub fn from_occupancy(occupancy: &str, size: Size) -> Result<Self, GridError> {
        if occupancy.len() != size.area() {
            return Err(GridError::OccupancyLength {
                actual: occupancy.len(),
                expected: size.area(),
                height: size.height(),
                width: size.width(),
            });
        }
        let cells = occupancy
            .chars()
            .enumerate()
            .map(|(offset, found)| match found {
                '0' => Ok(false),
                '1' => Ok(true),
                _ => Err(GridError::OccupancyChar { found, offset }),
            })
            .collect::<Result<Vec<bool>, GridError>>()?;
        Ok(Self {
            cells,
            height: size.height(),
            width: size.width(),
        })
    }

    pub fn size(&self) -> Size {
        Size {
            height: self.height,
            width: self.width,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn occupancy(&self) -> String {
        self.cells.iter().map(|&v| if v { '1' } else { '0' }).collect()
    }

    pub fn cell(&self, coord: Coord) -> Option<bool> {
        if !self.size().contains(coord) {
            return None;
        }
        Some(self.cells[coord.row * self.width + coord.col])
    }

    /// Caller guarantees `coord` is in bounds.
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.cells[coord.row * self.width + coord.col]
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|v| **v).count()
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Pure overlay: a new board with `coords` forced occupied. Existing
    /// occupied cells stay occupied; nothing is rejected.
    pub fn apply(&self, coords: &[Coord]) -> Grid {
        let mut next = self.clone();
        for coord in coords {
            next.cells[coord.row * self.width + coord.col] = true;
        }
        next
    }

    pub(crate) fn as_ndarray(&self) -> ArrayView2<bool> {
        ArrayView2::from_shape((self.height, self.width), &self.cells).unwrap()
    }
}
