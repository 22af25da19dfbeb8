//! Estimate driving minutes between two coordinates.
//!
//! [`TravelTimeEstimator`] is the seam used by route sequencing. The default
//! [`ZoneSpeedEstimator`] derives a duration from haversine distance, a
//! per-zone base speed and the weather delay multiplier.

mod error;
mod estimator;

pub use error::ZoneSpeedConfigError;
pub use estimator::{TravelTimeEstimator, ZoneSpeedConfig, ZoneSpeedEstimator};
