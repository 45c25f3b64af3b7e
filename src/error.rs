//! Setup errors.
//!
//! Every precondition of a run is checked before the first generation is
//! evaluated. Once the evolutionary loop starts, no operation can fail.

/// Errors raised while building grids, problems, or configurations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleFindError {
    /// Fewer than two snapshots: there is no transition to learn from.
    #[error("insufficient data: at least 2 snapshots are required, got {found}")]
    InsufficientData { found: usize },

    /// A snapshot's dimensions differ from the first snapshot's.
    #[error(
        "dimension mismatch: snapshot {index} is {}x{}, expected {}x{}",
        .found.0, .found.1, .expected.0, .expected.1
    )]
    DimensionMismatch {
        index: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A grid could not be built from the supplied cells.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RuleFindError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_precondition() {
        let err = RuleFindError::InsufficientData { found: 1 };
        assert_eq!(
            err.to_string(),
            "insufficient data: at least 2 snapshots are required, got 1"
        );

        let err = RuleFindError::DimensionMismatch {
            index: 2,
            expected: (4, 4),
            found: (5, 3),
        };
        assert_eq!(
            err.to_string(),
            "dimension mismatch: snapshot 2 is 5x3, expected 4x4"
        );

        let err = RuleFindError::InvalidConfiguration("mutation_rate must be in [0, 1]".into());
        assert!(err.to_string().contains("mutation_rate"));
    }
}
