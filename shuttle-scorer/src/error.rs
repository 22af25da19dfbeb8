//! Error types raised while configuring efficiency scoring.

use thiserror::Error;

/// Errors from [`crate::ScoreWeights::validate`] and
/// [`crate::RecommendationThresholds::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreWeightsError {
    /// A weight was negative or not finite.
    #[error("weight '{field}' must be finite and non-negative, found {value}")]
    InvalidWeight {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Every weight in a group was zero.
    #[error("{group} weights must not all be zero")]
    ZeroTotal {
        /// `route` or `fleet`.
        group: &'static str,
    },
    /// The baseline route distance was not positive.
    #[error("baseline distance must be positive, found {0} km")]
    InvalidBaseline(f64),
    /// A threshold was outside its valid range.
    #[error("threshold '{field}' is out of range: {value}")]
    InvalidThreshold {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}
