use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::model::{coord_range, Coord, Direction, Grid, GridError};

/// Identifier assigned to an equation during one decomposition pass. Ids are
/// 1-based in scan order and carry no identity across boards; only the
/// coordinate partition is meaningful.
pub type EquationId = usize;

/// The canonical split of a board into fixed-length straight runs, together
/// with the bidirectional coordinate/equation mapping. Recomputed from the
/// occupancy on demand, never stored on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    equations: BTreeMap<EquationId, Vec<Coord>>,
    owners: HashMap<Coord, BTreeSet<EquationId>>,
}

impl Decomposition {
    pub fn equation_count(&self) -> usize {
        self.equations.len()
    }

    /// Equations in id order; each run is in ascending coordinate order.
    pub fn equations(&self) -> impl Iterator<Item = (EquationId, &[Coord])> {
        self.equations.iter().map(|(id, run)| (*id, run.as_slice()))
    }

    pub fn run(&self, id: EquationId) -> Option<&[Coord]> {
        self.equations.get(&id).map(|run| run.as_slice())
    }

    pub fn owners_of(&self, coord: Coord) -> Option<&BTreeSet<EquationId>> {
        self.owners.get(&coord)
    }

    /// Coordinates owned by more than one equation.
    pub fn cross_points(&self) -> impl Iterator<Item = (Coord, &BTreeSet<EquationId>)> {
        self.owners
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(coord, ids)| (*coord, ids))
    }

    /// Number of distinct cells covered by at least one equation.
    pub fn covered_count(&self) -> usize {
        self.owners.len()
    }

    /// Coordinate partition with ids erased, for comparing decompositions of
    /// the same occupancy.
    pub fn partition(&self) -> BTreeSet<Vec<Coord>> {
        self.equations.values().cloned().collect()
    }
}

/// Scans the board row-major and collects every fully occupied run of
/// `equation_length` cells, horizontal and vertical attempts independent at
/// each start cell. A pure, deterministic function of the occupancy.
pub fn decompose(grid: &Grid, equation_length: usize) -> Result<Decomposition, GridError> {
    let size = grid.size();
    if grid.cell_count() != size.area() {
        return Err(GridError::OccupancyLength {
            actual: grid.cell_count(),
            expected: size.area(),
            height: size.height(),
            width: size.width(),
        });
    }

    let mut equations: BTreeMap<EquationId, Vec<Coord>> = BTreeMap::new();
    let mut owners: HashMap<Coord, BTreeSet<EquationId>> = HashMap::new();
    let mut next_id: EquationId = 1;

    let mut record = |run: Vec<Coord>, id: &mut EquationId| {
        for coord in &run {
            owners.entry(*coord).or_default().insert(*id);
        }
        equations.insert(*id, run);
        *id += 1;
    };

    for row in 0..size.height() {
        for col in 0..size.width() {
            let start = Coord::new(row, col);
            for direction in [Direction::Horizontal, Direction::Vertical] {
                if let Some(run) = coord_range(start, equation_length, direction, size) {
                    if run.iter().all(|c| grid.is_occupied(*c)) {
                        record(run, &mut next_id);
                    }
                }
            }
        }
    }

    Ok(Decomposition { equations, owners })
}
