//! Rule inference as a GA problem.
//!
//! [`RuleInference`] owns a validated snapshot sequence and plugs rule
//! candidates into the generic evolutionary driver: random tables for
//! initialization, snapshot mismatch count for fitness, uniform crossover,
//! and per-gene bit-flip mutation.

use super::fitness;
use super::grid::Grid;
use super::rule::RuleCandidate;
use crate::error::{Result, RuleFindError};
use crate::ga::{GaConfig, GaProblem, GaResult, GaRunner};
use rand::Rng;

/// Searches for the rule that best explains an observed snapshot sequence.
///
/// # Examples
///
/// ```
/// use ca_rulefind::ca::{simulate, Grid, RuleInference, RuleTable};
/// use ca_rulefind::ga::GaConfig;
///
/// let seed = Grid::from_ascii(".#..\n..#.\n###.\n....").unwrap();
/// let frames = simulate(&seed, &RuleTable::life(), 2);
///
/// let problem = RuleInference::new(frames).unwrap();
/// let config = GaConfig::default()
///     .with_max_generations(200)
///     .with_seed(7)
///     .with_parallel(false);
/// let result = problem.solve(&config).unwrap();
///
/// assert_eq!(result.best_fitness, 0);
/// ```
#[derive(Debug, Clone)]
pub struct RuleInference {
    snapshots: Vec<Grid>,
}

impl RuleInference {
    /// Validates and takes ownership of an ordered snapshot sequence.
    ///
    /// # Errors
    /// - [`RuleFindError::InsufficientData`] with fewer than two snapshots
    /// - [`RuleFindError::DimensionMismatch`] if any snapshot's size differs
    ///   from the first one's
    pub fn new(snapshots: Vec<Grid>) -> Result<Self> {
        if snapshots.len() < 2 {
            return Err(RuleFindError::InsufficientData {
                found: snapshots.len(),
            });
        }

        let expected = snapshots[0].dimensions();
        if let Some((index, grid)) = snapshots
            .iter()
            .enumerate()
            .find(|(_, g)| g.dimensions() != expected)
        {
            return Err(RuleFindError::DimensionMismatch {
                index,
                expected,
                found: grid.dimensions(),
            });
        }

        log::debug!(
            "rule inference over {} snapshots of {}x{}",
            snapshots.len(),
            expected.0,
            expected.1
        );
        Ok(Self { snapshots })
    }

    /// The observed sequence, in time order.
    pub fn snapshots(&self) -> &[Grid] {
        &self.snapshots
    }

    /// `(width, height)` shared by every snapshot.
    pub fn dimensions(&self) -> (usize, usize) {
        self.snapshots[0].dimensions()
    }

    /// Number of consecutive snapshot pairs (transitions).
    pub fn transitions(&self) -> usize {
        self.snapshots.len() - 1
    }

    /// Largest possible error: every cell wrong in every transition.
    pub fn max_error(&self) -> u64 {
        let (w, h) = self.dimensions();
        (self.transitions() * w * h) as u64
    }

    /// Runs the evolutionary search with `config`.
    pub fn solve(&self, config: &GaConfig) -> Result<GaResult<RuleCandidate>> {
        GaRunner::run(self, config)
    }
}

impl GaProblem for RuleInference {
    type Individual = RuleCandidate;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> RuleCandidate {
        RuleCandidate::random(rng)
    }

    fn evaluate(&self, candidate: &RuleCandidate) -> u64 {
        fitness::evaluate(&candidate.rule, &self.snapshots)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &RuleCandidate,
        parent2: &RuleCandidate,
        rng: &mut R,
    ) -> RuleCandidate {
        parent1.crossover(parent2, rng)
    }

    fn mutate<R: Rng>(&self, candidate: &mut RuleCandidate, rate: f64, rng: &mut R) {
        candidate.mutate(rate, rng);
    }
}
