use std::collections::VecDeque;

use serde::Serialize;

use crate::cross::{classify_cross_point, EquationCrossType};
use crate::decompose::{decompose, Decomposition};
use crate::model::Grid;
use crate::ring::outer_ring_counts;

/// Why a board failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
pub enum RejectReason {
    #[error("occupancy does not match the declared board size")]
    Malformed,
    #[error("occupied cells do not form a single connected region")]
    Disconnected,
    #[error("illegal cross point")]
    IllegalCrossPoint,
    #[error("occupied cells outside any equation")]
    StrayCells,
    #[error("an outer edge has no occupied cells")]
    OpenBoundary,
}

/// Validation outcome: the number of equations on success, a diagnostic
/// reason on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid { formula_count: usize },
    Invalid(RejectReason),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid { .. })
    }
}

/// Full structural audit. Checks run in order and stop at the first
/// failure: connectivity, cross-point legality (a finished board must have
/// at least one cross point), coverage shape, boundary tightness.
pub fn validate(grid: &Grid, equation_length: usize) -> Verdict {
    if !is_connected(grid) {
        return Verdict::Invalid(RejectReason::Disconnected);
    }

    let decomposition = match decompose(grid, equation_length) {
        Ok(decomposition) => decomposition,
        Err(err) => {
            log::error!("decomposition failed during validation: {err}");
            return Verdict::Invalid(RejectReason::Malformed);
        }
    };

    if !cross_points_legal(&decomposition, true) {
        return Verdict::Invalid(RejectReason::IllegalCrossPoint);
    }

    if decomposition.covered_count() != grid.occupied_count() {
        return Verdict::Invalid(RejectReason::StrayCells);
    }

    // Outer segments always fit a positively sized board.
    let counts = outer_ring_counts(grid).expect("outer ring lies within the board");
    if !counts.all_positive() {
        return Verdict::Invalid(RejectReason::OpenBoundary);
    }

    Verdict::Valid {
        formula_count: decomposition.equation_count(),
    }
}

/// Cross-point legality on its own. `require_cross_point` demands at least
/// one crossing, which holds for finished boards but not for boards still
/// under construction; incremental callers pass `false`.
pub fn cross_points_legal(decomposition: &Decomposition, require_cross_point: bool) -> bool {
    let mut seen_any = false;
    for (coord, _) in decomposition.cross_points() {
        seen_any = true;
        match classify_cross_point(decomposition, coord) {
            Some(cross) if cross.cross_type != EquationCrossType::None => {}
            _ => return false,
        }
    }
    seen_any || !require_cross_point
}

/// 4-directional flood fill from the first occupied cell in row-major
/// order. A board with no occupied cells is not connected.
fn is_connected(grid: &Grid) -> bool {
    let view = grid.as_ndarray();
    let (height, width) = view.dim();

    let first = match (0..height)
        .flat_map(|r| (0..width).map(move |c| (r, c)))
        .find(|&(r, c)| view[[r, c]])
    {
        Some(first) => first,
        None => return false,
    };

    let mut seen = vec![false; height * width];
    let mut queue = VecDeque::from([first]);
    seen[first.0 * width + first.1] = true;
    let mut reached = 0usize;

    while let Some((r, c)) = queue.pop_front() {
        reached += 1;
        let neighbors = [
            r.checked_sub(1).map(|r| (r, c)),
            (r + 1 < height).then_some((r + 1, c)),
            c.checked_sub(1).map(|c| (r, c)),
            (c + 1 < width).then_some((r, c + 1)),
        ];
        for (nr, nc) in neighbors.into_iter().flatten() {
            if view[[nr, nc]] && !seen[nr * width + nc] {
                seen[nr * width + nc] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    reached == grid.occupied_count()
}
