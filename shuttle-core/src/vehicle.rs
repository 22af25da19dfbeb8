//! Fleet vehicles and the activity destination they drive to.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::ClockTime;
use crate::geo_metrics::LatLng;

/// Errors returned by [`Vehicle::new`] and [`Vehicle::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VehicleError {
    /// The identifier was blank.
    #[error("vehicle identifier must not be empty")]
    EmptyId,
    /// Capacity was zero.
    #[error("vehicle '{id}' must seat at least one passenger")]
    ZeroCapacity {
        /// Offending vehicle.
        id: String,
    },
}

/// A capacity-constrained vehicle starting from its home depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Unique identifier; ties in planning are broken by it.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Assigned driver.
    pub driver: String,
    /// Passenger seats.
    pub capacity: u32,
    /// Start coordinate.
    pub home: LatLng,
}

impl Vehicle {
    /// Validate and construct a vehicle.
    ///
    /// # Errors
    /// Returns [`VehicleError`] when the id is blank or capacity is zero.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        driver: impl Into<String>,
        capacity: u32,
        home: LatLng,
    ) -> Result<Self, VehicleError> {
        let vehicle = Self {
            id: id.into(),
            name: name.into(),
            driver: driver.into(),
            capacity,
            home,
        };
        vehicle.validate()?;
        Ok(vehicle)
    }

    /// Check invariants that deserialisation cannot enforce.
    ///
    /// # Errors
    /// Returns [`VehicleError`] when the id is blank or capacity is zero.
    pub fn validate(&self) -> Result<(), VehicleError> {
        if self.id.trim().is_empty() {
            return Err(VehicleError::EmptyId);
        }
        if self.capacity == 0 {
            return Err(VehicleError::ZeroCapacity {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

/// Where the tour starts and when guests must be there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLocation {
    /// Optional display name such as the marina.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Destination coordinate.
    pub location: LatLng,
    /// Activity start time.
    pub start_time: ClockTime,
}

impl ActivityLocation {
    /// Construct an unnamed activity location.
    #[must_use]
    pub const fn new(location: LatLng, start_time: ClockTime) -> Self {
        Self {
            name: None,
            location,
            start_time,
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
