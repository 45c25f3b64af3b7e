//! Genetic Algorithm framework.
//!
//! A small, trait-based generational GA. Problems implement [`GaProblem`],
//! which specifies how to create, evaluate, crossover, and mutate
//! individuals; [`EvolutionDriver`] owns everything that changes during a
//! run.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with associated fitness type
//! - [`GaProblem`]: Problem definition: initialization, evaluation, operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, tournament size,
//!   mutation rate, termination)
//! - [`EvolutionDriver`]: One-generation-at-a-time state machine
//! - [`GaRunner`]: Runs a driver to completion
//! - [`GaResult`]: Final optimization result with statistics
//!
//! # Algorithm
//!
//! Each generation is evaluated (optionally in parallel) and sorted best
//! first. The best individual ever seen is carried unchanged into slot 0 of
//! the next generation; every other slot is filled by two tournament
//! selections, a crossover and a mutation.
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use runner::{EvolutionDriver, GaResult, GaRunner, GenerationStats, Phase};
pub use selection::tournament;
pub use types::{Fitness, GaProblem, Individual};
