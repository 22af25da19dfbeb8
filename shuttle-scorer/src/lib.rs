//! Efficiency scoring and recommendations for shuttle dispatch plans.
//!
//! [`EfficiencyScorer`] grades each [`VehicleRoute`](shuttle_core::VehicleRoute)
//! on capacity utilisation, distance and pickup punctuality, blends the
//! routes into a fleet score, and turns scores, warnings and weather into
//! plain-language advice for operators. [`RunStatistics`] accumulates
//! outcomes across calls for callers that want a running summary.

#![forbid(unsafe_code)]

mod efficiency;
mod error;
mod recommend;
mod stats;
mod types;

pub use efficiency::{EfficiencyScorer, FleetContext};
pub use error::ScoreWeightsError;
pub use recommend::RecommendationInput;
pub use stats::RunStatistics;
pub use types::{RecommendationThresholds, ScoreWeights};
