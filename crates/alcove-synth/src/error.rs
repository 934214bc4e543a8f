//! Error types for the synth crate.

use thiserror::Error;

use crate::coordinates::CanonicalCoordinate;

/// Errors produced by XX-interaction synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// No reflection, shift and axis pairing realizes a hop.
    ///
    /// Believed to stem from an unlucky decomposition path rather than a
    /// structural impossibility, so re-deriving the path and retrying is
    /// reasonable.
    #[error(
        "No backsolution for hop {hop}: cannot reach {target} from {start} with an XX interaction of strength {strength}"
    )]
    NoBacksolution {
        /// Index of the hop within its path.
        hop: usize,
        /// Positive canonical coordinate the hop starts from.
        start: CanonicalCoordinate,
        /// Positive canonical coordinate the hop should reach.
        target: CanonicalCoordinate,
        /// Canonical strength of the native interaction.
        strength: f64,
    },

    /// A hop names an interaction the catalog does not contain.
    #[error("Unknown native interaction '{0}'")]
    UnknownInteraction(String),

    /// A catalog entry is not an XX-type interaction.
    #[error("Native interaction '{label}' is not of XX type: canonical coordinate {coordinate}")]
    NotXxInteraction {
        /// Label of the offending entry.
        label: String,
        /// Its positive canonical coordinate.
        coordinate: CanonicalCoordinate,
    },

    /// An equality list leaves one alcove axis unconstrained.
    #[error("Equalities for '{label}' do not determine alcove axis {axis}")]
    UnderdeterminedCoordinate {
        /// Label of the offending entry.
        label: String,
        /// The unconstrained axis.
        axis: usize,
    },

    /// An axis permutation was requested for a pair that is not two distinct
    /// axes out of three.
    #[error("Invalid canonical axis pair ({first}, {second})")]
    InvalidAxisPair {
        /// Axis rotated into XX.
        first: usize,
        /// Axis rotated into YY.
        second: usize,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] alcove_ir::IrError),
}

impl SynthError {
    /// Whether the caller may retry against a freshly derived path.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SynthError::NoBacksolution { .. })
    }
}

/// Result type for synthesis operations.
pub type SynthResult<T> = Result<T, SynthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_backsolution_failures_are_retryable() {
        let err = SynthError::NoBacksolution {
            hop: 1,
            start: CanonicalCoordinate::new(0.1, 0.2, 0.3),
            target: CanonicalCoordinate::new(0.55, 0.75, 1.05),
            strength: 0.2,
        };
        assert!(err.is_retryable());
        assert!(err.to_string().contains("hop 1"));

        assert!(!SynthError::UnknownInteraction("cx".into()).is_retryable());
        assert!(!SynthError::InvalidAxisPair { first: 1, second: 1 }.is_retryable());
    }

    #[test]
    fn test_backsolution_failure_has_no_underlying_cause() {
        let err = SynthError::NoBacksolution {
            hop: 2,
            start: CanonicalCoordinate::new(0.1, 0.2, 0.3),
            target: CanonicalCoordinate::new(0.55, 0.75, 1.05),
            strength: 0.2,
        };
        assert!(std::error::Error::source(&err).is_none());
        assert!(err.to_string().contains("from (0.100000, 0.200000, 0.300000)"));
    }
}
