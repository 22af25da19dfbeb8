//! Dispatch inputs bundled for the [`crate::Dispatcher`] seam.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::dispatcher::OptimizeError;
use crate::guest::Guest;
use crate::vehicle::{ActivityLocation, Vehicle};
use crate::weather::WeatherSnapshot;

/// Everything needed to plan one morning's pickups.
///
/// # Examples
/// ```
/// use shuttle_core::OptimizeRequest;
///
/// let request: OptimizeRequest = serde_json::from_str(r#"{
///     "guests": [],
///     "vehicles": [],
///     "activity": {"location": {"lat": 24.39, "lng": 124.14}, "start_time": "09:30"}
/// }"#).expect("request should decode");
/// assert!(request.weather.is_none());
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    /// Parties to collect.
    pub guests: Vec<Guest>,
    /// Available fleet.
    pub vehicles: Vec<Vehicle>,
    /// Shared destination.
    pub activity: ActivityLocation,
    /// Current conditions; absent means neutral.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
}

impl OptimizeRequest {
    /// Bundle inputs.
    #[must_use]
    pub const fn new(
        guests: Vec<Guest>,
        vehicles: Vec<Vehicle>,
        activity: ActivityLocation,
        weather: Option<WeatherSnapshot>,
    ) -> Self {
        Self {
            guests,
            vehicles,
            activity,
            weather,
        }
    }

    /// Check structural invariants before planning.
    ///
    /// Every guest and vehicle must pass its own validation and identifiers
    /// must be unique within each list. An empty fleet is not rejected here;
    /// dispatchers decide whether it matters.
    ///
    /// # Errors
    /// Returns the first violation found as an [`OptimizeError`].
    pub fn validate(&self) -> Result<(), OptimizeError> {
        let mut guest_ids = BTreeSet::new();
        for guest in &self.guests {
            guest.validate()?;
            if !guest_ids.insert(guest.id.as_str()) {
                return Err(OptimizeError::DuplicateGuestId(guest.id.clone()));
            }
        }
        let mut vehicle_ids = BTreeSet::new();
        for vehicle in &self.vehicles {
            vehicle.validate()?;
            if !vehicle_ids.insert(vehicle.id.as_str()) {
                return Err(OptimizeError::DuplicateVehicleId(vehicle.id.clone()));
            }
        }
        Ok(())
    }

    /// Total seats requested, summed wide enough for any `u32` party sizes.
    #[must_use]
    pub fn total_party_size(&self) -> u64 {
        self.guests.iter().map(|guest| u64::from(guest.party_size)).sum()
    }

    /// Total seats available, summed wide enough for any `u32` capacities.
    #[must_use]
    pub fn total_capacity(&self) -> u64 {
        self.vehicles
            .iter()
            .map(|vehicle| u64::from(vehicle.capacity))
            .sum()
    }
}
