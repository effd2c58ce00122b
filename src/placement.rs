use crate::decompose::Decomposition;
use crate::model::{Coord, Direction, Grid, Placement};

/// Proposes every legal way to grow the board by exactly one equation.
/// Derived solely from the current decomposition, never from placement
/// history, so the result is a pure function of the occupancy.
pub fn candidate_placements(
    grid: &Grid,
    decomposition: &Decomposition,
    equation_length: usize,
) -> Vec<Placement> {
    let mut placements = Vec::new();
    for (_, run) in decomposition.equations() {
        let start = run[0];
        let direction = run_direction(run);
        for anchor in anchors_around(start, direction, equation_length) {
            let candidate = Placement::new(anchor.row, anchor.col, direction.reverse());
            if placement_is_legal(grid, candidate, equation_length) {
                placements.push(candidate);
            }
        }
    }
    placements
}

/// A run has at least two cells; its first two decide the orientation.
fn run_direction(run: &[Coord]) -> Direction {
    if run[0].row == run[1].row {
        Direction::Horizontal
    } else {
        Direction::Vertical
    }
}

/// The 3x3 anchor offsets around an equation's start: each pairing of the
/// new equation's legal cross positions with the existing one's. For length
/// 5 these are {0, ±2, ±4} along the two axes. A crossing candidate in the
/// reversed direction starts at or before the existing start, hence the
/// negative offsets on the crossing axis.
fn anchors_around(start: Coord, direction: Direction, equation_length: usize) -> Vec<Coord> {
    let mid = ((equation_length - 1) / 2) as isize;
    let last = (equation_length - 1) as isize;
    let toward = [0, mid, last];
    let back = [0, -mid, -last];

    let mut anchors = Vec::with_capacity(9);
    match direction {
        Direction::Horizontal => {
            for dr in back {
                for dc in toward {
                    anchors.extend(start.offset_by(dr, dc));
                }
            }
        }
        Direction::Vertical => {
            for dr in toward {
                for dc in back {
                    anchors.extend(start.offset_by(dr, dc));
                }
            }
        }
    }
    anchors
}

fn placement_is_legal(grid: &Grid, placement: Placement, equation_length: usize) -> bool {
    let size = grid.size();
    let run = match placement.coords(equation_length, size) {
        Some(run) => run,
        None => return false,
    };

    // Edge isolation: the cells just before the start and just after the
    // end must be empty or off-board, otherwise two runs would merge.
    let (dr, dc) = placement.direction.step();
    let before = placement.start().offset_by(-(dr as isize), -(dc as isize));
    let after = run[equation_length - 1].offset_by(dr as isize, dc as isize);
    for neighbor in [before, after].into_iter().flatten() {
        if grid.cell(neighbor) == Some(true) {
            return false;
        }
    }

    // The new equation must cross the existing structure at one to three
    // cells, all of them at its own head/middle/tail indices.
    let mid = (equation_length - 1) / 2;
    let legal_indices = [0, mid, equation_length - 1];
    let mut crossings = 0usize;
    for (index, coord) in run.iter().enumerate() {
        if grid.is_occupied(*coord) {
            if !legal_indices.contains(&index) {
                return false;
            }
            crossings += 1;
        }
    }
    (1..=3).contains(&crossings)
}
