//! Seams for dispatch implementations and optional delay advice.

use thiserror::Error;

use crate::clock::ClockTime;
use crate::guest::{Guest, GuestError};
use crate::request::OptimizeRequest;
use crate::result::OptimizationResult;
use crate::vehicle::{Vehicle, VehicleError};
use crate::weather::WeatherImpact;

/// Structural failures that abort a dispatch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    /// Guests were supplied but the fleet is empty.
    #[error("no vehicles available for {guests} guest(s)")]
    NoVehiclesAvailable {
        /// Guests that could not be placed.
        guests: usize,
    },
    /// A guest failed validation.
    #[error("invalid guest: {0}")]
    InvalidGuest(#[from] GuestError),
    /// A vehicle failed validation.
    #[error("invalid vehicle: {0}")]
    InvalidVehicle(#[from] VehicleError),
    /// Two guests share an identifier.
    #[error("duplicate guest id '{0}'")]
    DuplicateGuestId(String),
    /// Two vehicles share an identifier.
    #[error("duplicate vehicle id '{0}'")]
    DuplicateVehicleId(String),
    /// The caller cancelled the run.
    #[error("dispatch cancelled")]
    Cancelled,
}

/// Plan pickups for a request.
///
/// Implementations must be pure functions of the request: no I/O and no
/// state carried between calls. They must be `Send + Sync` so one instance
/// can serve concurrent callers.
pub trait Dispatcher: Send + Sync {
    /// Assign, sequence and score.
    ///
    /// # Errors
    /// Returns [`OptimizeError`] for structural failures only; soft anomalies
    /// are reported as warnings inside the result.
    fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizationResult, OptimizeError>;
}

/// External predictor of extra pickup delay.
///
/// Advice annotates stops and never alters computed times.
pub trait DelayAdvisor: Send + Sync {
    /// Predicted extra minutes for collecting `guest` at `scheduled`, or
    /// `None` when the advisor has no opinion.
    fn advise(
        &self,
        vehicle: &Vehicle,
        guest: &Guest,
        scheduled: ClockTime,
        impact: &WeatherImpact,
    ) -> Option<f64>;
}
