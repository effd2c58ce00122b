//! Enumeration of crossmath board layouts: occupancy grids whose filled
//! cells decompose into fixed-length horizontal and vertical equation
//! runs crossing each other only at legal positions.
//!
//! [`generate::generate`] streams every legal board for a size lazily;
//! [`validate::validate`] judges a single board, with the structural
//! pieces (decomposition, cross point classification, candidate
//! placement) exposed for callers that want the intermediate views.

pub mod cross;
pub mod decompose;
pub mod export;
pub mod generate;
pub mod model;
pub mod placement;
pub mod progress;
pub mod render;
pub mod ring;
pub mod validate;

pub use generate::{generate, DEFAULT_EQUATION_LENGTH};
pub use model::{Coord, Direction, Grid, GridError, Placement, Size};
pub use validate::{validate, RejectReason, Verdict};
