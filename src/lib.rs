//! Cellular-automaton rule inference by genetic search.
//!
//! Given an ordered sequence of binary grid snapshots produced by an unknown
//! local update rule, finds the two-state lookup-table rule that best
//! reproduces every observed transition.
//!
//! - **`ca`**: grids, the 18-entry rule table, the toroidal Moore-neighborhood
//!   step function, and the snapshot mismatch fitness.
//! - **`ga`**: a generic generational GA with tournament selection and
//!   best-ever elitism, driven one generation at a time.
//!
//! # Example
//!
//! ```
//! use ca_rulefind::ca::{simulate, Grid, RuleInference, RuleTable};
//! use ca_rulefind::ga::GaConfig;
//!
//! // Observed frames; here synthesized from a known rule.
//! let glider = Grid::from_ascii(
//!     ".#......\n..#.....\n###.....\n........\n........\n........\n........\n........",
//! )?;
//! let frames = simulate(&glider, &RuleTable::life(), 8);
//!
//! let problem = RuleInference::new(frames)?;
//! let config = GaConfig::default().with_max_generations(300).with_seed(42);
//! let result = problem.solve(&config)?;
//!
//! assert_eq!(result.best_fitness, 0);
//! println!("{} found at generation {}", result.best.rule, result.best_generation);
//! # Ok::<(), ca_rulefind::RuleFindError>(())
//! ```
//!
//! # Scope
//!
//! Decoding raster images, rendering, and persisting rules are left to the
//! host. The engine sees only already-binarized [`ca::Grid`]s and returns a
//! [`ga::GaResult`].

pub mod ca;
mod error;
pub mod ga;

pub use error::{Result, RuleFindError};
