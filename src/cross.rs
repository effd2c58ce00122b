use serde::Serialize;

use crate::decompose::{Decomposition, EquationId};
use crate::model::Coord;

/// Where a shared cell sits inside one equation's run. Any interior index
/// other than the exact middle is `None` and always illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CrossPosition {
    None,
    Head,
    Middle,
    Tail,
}

/// The 9 recognized position pairs, or `None` for anything unclassifiable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EquationCrossType {
    None,
    HeadToHead,
    HeadToMiddle,
    HeadToTail,
    TailToHead,
    TailToMiddle,
    TailToTail,
    MiddleToHead,
    MiddleToMiddle,
    MiddleToTail,
}

impl EquationCrossType {
    /// Ordered pair lookup; the first position belongs to the lower of the
    /// two owning equation ids.
    pub fn from_positions(first: CrossPosition, second: CrossPosition) -> Self {
        use CrossPosition::*;
        match (first, second) {
            (Head, Head) => EquationCrossType::HeadToHead,
            (Head, Middle) => EquationCrossType::HeadToMiddle,
            (Head, Tail) => EquationCrossType::HeadToTail,
            (Tail, Head) => EquationCrossType::TailToHead,
            (Tail, Middle) => EquationCrossType::TailToMiddle,
            (Tail, Tail) => EquationCrossType::TailToTail,
            (Middle, Head) => EquationCrossType::MiddleToHead,
            (Middle, Middle) => EquationCrossType::MiddleToMiddle,
            (Middle, Tail) => EquationCrossType::MiddleToTail,
            _ => EquationCrossType::None,
        }
    }

    pub fn is_point_to_point(self) -> bool {
        matches!(
            self,
            EquationCrossType::HeadToHead
                | EquationCrossType::HeadToTail
                | EquationCrossType::TailToHead
                | EquationCrossType::TailToTail
        )
    }

    pub fn is_point_to_middle(self) -> bool {
        matches!(
            self,
            EquationCrossType::HeadToMiddle
                | EquationCrossType::TailToMiddle
                | EquationCrossType::MiddleToHead
                | EquationCrossType::MiddleToTail
        )
    }

    pub fn is_middle_to_middle(self) -> bool {
        self == EquationCrossType::MiddleToMiddle
    }
}

/// Classification of one shared cell between exactly two equations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossPoint {
    pub coord: Coord,
    /// Owning ids in ascending order.
    pub equations: (EquationId, EquationId),
    pub positions: (CrossPosition, CrossPosition),
    pub cross_type: EquationCrossType,
}

/// Classifies a shared cell. `None` when the coordinate is owned by more or
/// fewer than exactly two equations.
pub fn classify_cross_point(decomposition: &Decomposition, coord: Coord) -> Option<CrossPoint> {
    let owners = decomposition.owners_of(coord)?;
    if owners.len() != 2 {
        return None;
    }
    let mut ids = owners.iter().copied();
    let first = ids.next()?;
    let second = ids.next()?;

    let first_position = position_in_run(decomposition.run(first)?, coord);
    let second_position = position_in_run(decomposition.run(second)?, coord);

    Some(CrossPoint {
        coord,
        equations: (first, second),
        positions: (first_position, second_position),
        cross_type: EquationCrossType::from_positions(first_position, second_position),
    })
}

/// The run is in ascending coordinate order: index 0 is the head, the last
/// index the tail, and the exact center (odd lengths only) the middle.
fn position_in_run(run: &[Coord], coord: Coord) -> CrossPosition {
    let index = match run.iter().position(|c| *c == coord) {
        Some(index) => index,
        None => return CrossPosition::None,
    };
    if index == 0 {
        CrossPosition::Head
    } else if index == run.len() - 1 {
        CrossPosition::Tail
    } else if run.len() % 2 == 1 && index == run.len() / 2 {
        CrossPosition::Middle
    } else {
        CrossPosition::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::decompose;
    use crate::model::{Grid, Size};

    #[test]
    fn position_pair_table_covers_all_nine_combinations() {
        use CrossPosition::*;
        let cases = [
            ((Head, Head), EquationCrossType::HeadToHead),
            ((Head, Middle), EquationCrossType::HeadToMiddle),
            ((Head, Tail), EquationCrossType::HeadToTail),
            ((Tail, Head), EquationCrossType::TailToHead),
            ((Tail, Middle), EquationCrossType::TailToMiddle),
            ((Tail, Tail), EquationCrossType::TailToTail),
            ((Middle, Head), EquationCrossType::MiddleToHead),
            ((Middle, Middle), EquationCrossType::MiddleToMiddle),
            ((Middle, Tail), EquationCrossType::MiddleToTail),
        ];
        for ((a, b), expected) in cases {
            assert_eq!(EquationCrossType::from_positions(a, b), expected);
        }
    }

    #[test]
    fn swapping_the_pair_mirrors_the_table() {
        use CrossPosition::*;
        // Reversing which equation comes first must land on the mirrored
        // entry, with no orphan combinations.
        let mirrored = [
            (Head, Tail, EquationCrossType::HeadToTail, EquationCrossType::TailToHead),
            (Head, Middle, EquationCrossType::HeadToMiddle, EquationCrossType::MiddleToHead),
            (Tail, Middle, EquationCrossType::TailToMiddle, EquationCrossType::MiddleToTail),
        ];
        for (a, b, forward, backward) in mirrored {
            assert_eq!(EquationCrossType::from_positions(a, b), forward);
            assert_eq!(EquationCrossType::from_positions(b, a), backward);
        }
        // Symmetric pairs are order-insensitive.
        assert_eq!(
            EquationCrossType::from_positions(Head, Head),
            EquationCrossType::HeadToHead
        );
        assert_eq!(
            EquationCrossType::from_positions(Tail, Tail),
            EquationCrossType::TailToTail
        );
        assert_eq!(
            EquationCrossType::from_positions(Middle, Middle),
            EquationCrossType::MiddleToMiddle
        );
    }

    #[test]
    fn none_position_absorbs_the_pair() {
        use CrossPosition::*;
        for p in [None, Head, Middle, Tail] {
            assert_eq!(
                EquationCrossType::from_positions(None, p),
                EquationCrossType::None
            );
            assert_eq!(
                EquationCrossType::from_positions(p, None),
                EquationCrossType::None
            );
        }
    }

    #[test]
    fn plus_shape_center_is_middle_to_middle() {
        let size = Size::new(5, 5).unwrap();
        let grid = Grid::from_occupancy("0010000100111110010000100", size).unwrap();
        let decomposition = decompose(&grid, 5).unwrap();
        let cross = classify_cross_point(&decomposition, Coord::new(2, 2)).unwrap();
        assert_eq!(cross.cross_type, EquationCrossType::MiddleToMiddle);
        assert_eq!(
            cross.positions,
            (CrossPosition::Middle, CrossPosition::Middle)
        );
        assert!(cross.equations.0 < cross.equations.1);
        assert!(cross.cross_type.is_middle_to_middle());
        assert!(!cross.cross_type.is_point_to_point());
    }

    #[test]
    fn single_owner_cells_are_not_classifiable() {
        let size = Size::new(5, 5).unwrap();
        let grid = Grid::from_occupancy("0010000100111110010000100", size).unwrap();
        let decomposition = decompose(&grid, 5).unwrap();
        assert_eq!(classify_cross_point(&decomposition, Coord::new(2, 0)), None);
        assert_eq!(classify_cross_point(&decomposition, Coord::new(0, 0)), None);
    }

    #[test]
    fn corner_crossings_classify_as_point_to_point() {
        // Top-left corner of the reference board: a horizontal and a
        // vertical equation both start there.
        let reference = "111110000101010000101011111101010000111110000000000000000000000000000000000000000000000000000000000";
        let grid = Grid::from_occupancy(reference, Size::new(11, 9).unwrap()).unwrap();
        let decomposition = decompose(&grid, 5).unwrap();
        let cross = classify_cross_point(&decomposition, Coord::new(0, 0)).unwrap();
        assert_eq!(cross.cross_type, EquationCrossType::HeadToHead);
        let cross = classify_cross_point(&decomposition, Coord::new(4, 0)).unwrap();
        assert!(cross.cross_type.is_point_to_point());
        let cross = classify_cross_point(&decomposition, Coord::new(0, 2)).unwrap();
        assert!(cross.cross_type.is_point_to_middle());
    }
}
