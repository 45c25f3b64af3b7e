//! Two-state cellular automata with lookup-table rules.
//!
//! Everything needed to score a candidate rule against an observed
//! sequence of binary snapshots:
//!
//! - [`Grid`]: one binary snapshot, toroidally wrapped when stepped
//! - [`RuleTable`]: the 18-entry `(state, live neighbors) → next state` table
//! - [`RuleCandidate`]: a table with its fitness, bred by the GA
//! - [`apply`]: one synchronous update over the Moore neighborhood
//! - [`evaluate`]: total prediction error over consecutive snapshot pairs
//! - [`RuleInference`]: the GA problem tying the above together
//!
//! # Scope
//!
//! Only the 8-cell Moore neighborhood on a torus is supported. Decoding
//! raster frames is left to the host; [`Grid::from_luma`] covers the common
//! single-channel threshold case.

mod engine;
mod fitness;
mod grid;
mod problem;
mod rule;

pub use engine::{apply, apply_into, live_neighbors, simulate};
pub use fitness::{evaluate, mismatches};
pub use grid::{Grid, BINARIZATION_THRESHOLD, DEFAULT_GRID_SIZE};
pub use problem::RuleInference;
pub use rule::{RuleCandidate, RuleTable, NEIGHBOR_COUNTS, TABLE_SIZE, UNEVALUATED};
