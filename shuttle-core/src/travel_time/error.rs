use thiserror::Error;

use crate::zone::Zone;

/// Errors from [`crate::travel_time::ZoneSpeedConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ZoneSpeedConfigError {
    /// A base speed was zero, negative or not finite.
    #[error("base speed for {zone} must be positive, found {speed_kmh}")]
    NonPositiveSpeed {
        /// Zone with the bad speed.
        zone: Zone,
        /// Rejected speed.
        speed_kmh: f64,
    },
    /// An overhead term was negative or not finite.
    #[error("overhead '{field}' must be zero or positive, found {value}")]
    NegativeOverhead {
        /// Field name.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The floor for distinct points was not positive.
    #[error("minimum leg duration must be positive, found {0}")]
    NonPositiveMinimum(f64),
}
