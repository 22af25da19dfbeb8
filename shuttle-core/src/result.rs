//! Dispatch output.

use serde::{Deserialize, Serialize};

use crate::route::VehicleRoute;
use crate::weather::WeatherImpact;

/// Soft anomaly recorded inside a successful result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchWarning {
    /// A vehicle carries more passengers than it seats.
    CapacityOverflow {
        /// Overloaded vehicle.
        vehicle_id: String,
        /// Seats beyond capacity.
        overflow: u32,
    },
    /// A pickup could not be brought inside its window tolerance.
    LatePickup {
        /// Vehicle making the pickup.
        vehicle_id: String,
        /// Guest collected late.
        guest_id: String,
        /// Minutes after the window end.
        minutes_late: i64,
    },
    /// A vehicle reaches the activity after it starts.
    LateArrival {
        /// Late vehicle.
        vehicle_id: String,
        /// Minutes after the activity start.
        minutes_late: i64,
    },
    /// A vehicle reaches the activity on time but inside the arrival buffer.
    TightArrival {
        /// Vehicle with little slack.
        vehicle_id: String,
        /// Minutes between arrival and the activity start.
        minutes_to_spare: i64,
    },
    /// Weather readings were missing or malformed.
    DegradedWeather,
}

/// Deterministic counters describing how the plan was reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Guests in the request.
    pub guests: usize,
    /// Vehicles in the request.
    pub vehicles: usize,
    /// Guests placed within capacity.
    pub phase_one_assignments: usize,
    /// Guests force-placed beyond capacity.
    pub forced_assignments: usize,
    /// Vehicles with at least one guest.
    pub vehicles_used: usize,
}

/// Complete dispatch plan.
///
/// Created fresh for every call; identical inputs produce identical results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// One route per vehicle with guests, ordered by vehicle identifier.
    pub routes: Vec<VehicleRoute>,
    /// Kilometres across all routes.
    pub total_distance_km: f64,
    /// In-vehicle minutes across all routes.
    pub total_duration_minutes: f64,
    /// Fleet score in `[0, 100]`.
    pub overall_efficiency: f64,
    /// Operator-facing advice.
    pub recommendations: Vec<String>,
    /// Evaluated weather.
    pub weather: WeatherImpact,
    /// Soft anomalies.
    pub warnings: Vec<DispatchWarning>,
    /// Planning counters.
    pub diagnostics: Diagnostics,
}

impl OptimizationResult {
    /// Result for a request without guests.
    #[must_use]
    pub fn empty(weather: WeatherImpact, vehicles: usize) -> Self {
        Self {
            routes: Vec::new(),
            total_distance_km: 0.0,
            total_duration_minutes: 0.0,
            overall_efficiency: 0.0,
            recommendations: Vec::new(),
            weather,
            warnings: Vec::new(),
            diagnostics: Diagnostics {
                vehicles,
                ..Diagnostics::default()
            },
        }
    }

    /// Route for a vehicle, if it has guests.
    #[must_use]
    pub fn route(&self, vehicle_id: &str) -> Option<&VehicleRoute> {
        self.routes.iter().find(|route| route.vehicle_id == vehicle_id)
    }

    /// Late pickups across all routes.
    #[must_use]
    pub fn late_pickups(&self) -> usize {
        self.routes.iter().map(VehicleRoute::late_pickups).sum()
    }

    /// Guests served across all routes.
    #[must_use]
    pub fn guests_served(&self) -> usize {
        self.routes.iter().map(|route| route.pickups().count()).sum()
    }
}
