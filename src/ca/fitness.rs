//! Prediction error of a rule against an observed snapshot sequence.
//!
//! The error of a rule is the number of cells it predicts wrongly, summed
//! over every consecutive pair of snapshots. Zero means the rule reproduces
//! every observed transition exactly.
//!
//! This is the hot path of the whole search (`population × pairs × cells`
//! per generation), so predictions are compared against the target as they
//! are computed instead of being materialized into an intermediate grid.

use super::engine::for_each_prediction;
use super::grid::Grid;
use super::rule::RuleTable;

/// Number of cells where `apply(current, rule)` differs from `next`.
///
/// # Panics
/// Panics if the grids have different dimensions.
pub fn mismatches(current: &Grid, next: &Grid, rule: &RuleTable) -> u64 {
    assert_eq!(
        current.dimensions(),
        next.dimensions(),
        "snapshots must have equal dimensions"
    );
    let target = next.cells();
    let mut errors = 0u64;
    for_each_prediction(current, rule, |i, predicted| {
        errors += (predicted != target[i]) as u64;
    });
    errors
}

/// Total mismatches of `rule` over all consecutive snapshot pairs.
///
/// Fewer than two snapshots yield zero pairs and therefore zero error.
/// [`RuleInference::new`](super::RuleInference::new) rejects such input
/// so this never masquerades as a perfect score during a search.
pub fn evaluate(rule: &RuleTable, snapshots: &[Grid]) -> u64 {
    snapshots
        .windows(2)
        .map(|pair| mismatches(&pair[0], &pair[1], rule))
        .sum()
}
