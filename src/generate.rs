use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use genawaiter::yield_;

use crate::decompose::decompose;
use crate::model::{Direction, Grid, Placement, Size};
use crate::placement::candidate_placements;
use crate::ring::outer_ring_counts;

pub const DEFAULT_EQUATION_LENGTH: usize = 5;

type Visited = Rc<RefCell<HashSet<Grid>>>;

/// Enumerates every legal board of the given size as a lazy sequence. Each
/// board is handed to the caller before the next is computed, so the
/// enumeration can be abandoned early. Boards are distinct by occupancy;
/// symmetric variants count separately.
pub fn generate(size: Size, equation_length: usize) -> impl Iterator<Item = Grid> + 'static {
    genawaiter::rc::gen!({
        if equation_length < 2 {
            log::warn!("equation length {equation_length} cannot form a run, yielding nothing");
            return;
        }

        // One visited set for the whole size: a state reached from a later
        // seed via a different insertion order must not be expanded again.
        let visited: Visited = Rc::new(RefCell::new(HashSet::new()));
        let mut emitted = 0usize;

        for seed in seed_placements(size, equation_length) {
            let run = match seed.coords(equation_length, size) {
                Some(run) => run,
                None => continue,
            };
            let before = emitted;
            for grid in expand(Grid::empty(size).apply(&run), equation_length, visited.clone()) {
                emitted += 1;
                yield_!(grid);
            }
            log::info!(
                "seed {:?} produced {} boards ({} total)",
                seed,
                emitted - before,
                emitted
            );
        }
    })
    .into_iter()
}

/// Initial single-equation boards: horizontal runs along row 0 at every
/// other column, vertical runs down column 0 at every other row. Every
/// legal board touches the top and left edges, so each is reachable from
/// one of these.
fn seed_placements(size: Size, equation_length: usize) -> Vec<Placement> {
    let mut seeds = Vec::new();
    if size.width() >= equation_length {
        for col in (0..=size.width() - equation_length).step_by(2) {
            seeds.push(Placement::new(0, col, Direction::Horizontal));
        }
    }
    if size.height() >= equation_length {
        for row in (0..=size.height() - equation_length).step_by(2) {
            seeds.push(Placement::new(row, 0, Direction::Vertical));
        }
    }
    seeds
}

fn expand(grid: Grid, equation_length: usize, visited: Visited) -> Box<dyn Iterator<Item = Grid>> {
    Box::new(
        genawaiter::rc::gen!({
            {
                let mut visited = visited.borrow_mut();
                if !visited.insert(grid.clone()) {
                    // This occupancy and its whole subtree were already
                    // explored via some other insertion order.
                    return;
                }
            }

            // Lighter acceptance gate than full validation: a board is an
            // output as soon as its declared size is tight. The final
            // structural audit is covered by construction; see validate().
            let counts = outer_ring_counts(&grid).expect("outer ring lies within the board");
            if counts.all_positive() {
                yield_!(grid.clone());
            }

            let decomposition = match decompose(&grid, equation_length) {
                Ok(decomposition) => decomposition,
                Err(err) => {
                    log::error!("search produced a malformed board: {err}");
                    return;
                }
            };

            for placement in candidate_placements(&grid, &decomposition, equation_length) {
                let run = match placement.coords(equation_length, grid.size()) {
                    Some(run) => run,
                    None => continue,
                };
                let child = grid.apply(&run);
                debug_assert!(
                    crate::validate::cross_points_legal(
                        &decompose(&child, equation_length).unwrap(),
                        false
                    ),
                    "candidate {placement:?} created an illegal crossing"
                );
                for found in expand(child, equation_length, visited.clone()) {
                    yield_!(found);
                }
            }
        })
        .into_iter(),
    )
}
