//! Sequenced per-vehicle routes.
//!
//! A [`VehicleRoute`] lists pickup stops in visiting order followed by a
//! single terminal [`StopKind::Activity`] stop. Stop times strictly increase
//! along the route.

use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::geo_metrics::LatLng;
use crate::zone::Zone;

/// Punctuality of a stop against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compliance {
    /// Inside the window.
    OnTime,
    /// Before the window start.
    Early,
    /// After the window end.
    Late,
}

/// Heuristic used to order a vehicle's pickups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencingStrategy {
    /// Clockwise sweep around the cluster centroid.
    AngularSweep,
    /// Preferred-window start ascending.
    TimeWindow,
    /// Greedy nearest neighbour from the vehicle home.
    NearestNeighbour,
}

impl SequencingStrategy {
    /// All strategies in their fixed tie-break order.
    pub const ALL: [Self; 3] = [Self::AngularSweep, Self::TimeWindow, Self::NearestNeighbour];

    /// Strategy chosen for a cluster whose dominant zone is `zone`.
    #[must_use]
    pub const fn for_zone(zone: Zone) -> Self {
        match zone {
            Zone::Rural => Self::AngularSweep,
            Zone::DenseUrban => Self::TimeWindow,
            Zone::TouristHotspot | Zone::Generic => Self::NearestNeighbour,
        }
    }

    /// Return the strategy as a `snake_case` label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AngularSweep => "angular_sweep",
            Self::TimeWindow => "time_window",
            Self::NearestNeighbour => "nearest_neighbour",
        }
    }
}

impl std::fmt::Display for SequencingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SequencingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s.trim())
            .ok_or_else(|| {
                format!("unknown strategy '{s}', expected angular_sweep, time_window or nearest_neighbour")
            })
    }
}

/// What happens at a stop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StopKind {
    /// Collect a guest party.
    Pickup {
        /// Guest identifier.
        guest_id: String,
        /// Guest display name.
        guest_name: String,
        /// Seats taken.
        party_size: u32,
        /// Hotel for the driver sheet.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hotel: Option<String>,
        /// Guest notes for the driver sheet.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        notes: Option<String>,
    },
    /// Terminal stop at the activity location.
    Activity {
        /// Activity display name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

/// A scheduled stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    /// Pickup or terminal activity.
    #[serde(flatten)]
    pub kind: StopKind,
    /// Stop coordinate.
    pub location: LatLng,
    /// Pickup time, or arrival time for the activity stop.
    pub time: ClockTime,
    /// Kilometres from the previous stop (or home).
    pub distance_from_previous_km: f64,
    /// Minutes driven from the previous stop (or home).
    pub travel_minutes: f64,
    /// Punctuality tag.
    pub compliance: Compliance,
    /// Signed minutes outside the target: negative early, positive late.
    pub deviation_minutes: i64,
    /// Set when the time was moved toward the window.
    pub nudged: bool,
    /// Extra delay predicted by an external advisor; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory_delay_minutes: Option<f64>,
}

impl RouteStop {
    /// Guest identifier for pickup stops.
    #[must_use]
    pub fn guest_id(&self) -> Option<&str> {
        match &self.kind {
            StopKind::Pickup { guest_id, .. } => Some(guest_id),
            StopKind::Activity { .. } => None,
        }
    }

    /// True for pickup stops.
    #[must_use]
    pub const fn is_pickup(&self) -> bool {
        matches!(self.kind, StopKind::Pickup { .. })
    }
}

/// Score breakdown for one route, each component in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteEfficiency {
    /// Weighted score in `[0, 100]`.
    pub score: f64,
    /// Passengers over capacity, capped at one.
    pub capacity_utilisation: f64,
    /// One within the baseline distance, decaying beyond it.
    pub distance_efficiency: f64,
    /// Share of pickups tagged on time.
    pub compliance: f64,
}

/// One vehicle's schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRoute {
    /// Vehicle identifier.
    pub vehicle_id: String,
    /// Vehicle display name.
    pub vehicle_name: String,
    /// Driver name.
    pub driver: String,
    /// Time the vehicle leaves home.
    pub departure: ClockTime,
    /// Pickups in order, then the activity stop.
    pub stops: Vec<RouteStop>,
    /// Kilometres from home to the activity.
    pub total_distance_km: f64,
    /// In-vehicle minutes: driving plus boarding, excluding idle waits.
    pub total_duration_minutes: f64,
    /// Minutes spent waiting for windows to open.
    pub idle_minutes: f64,
    /// Seats used.
    pub passenger_count: u32,
    /// Seats available.
    pub capacity: u32,
    /// Seats used beyond capacity.
    pub overflow: u32,
    /// Dominant zone of the pickups.
    pub zone: Zone,
    /// Ordering heuristic applied.
    pub strategy: SequencingStrategy,
    /// Score breakdown.
    pub efficiency: RouteEfficiency,
}

impl VehicleRoute {
    /// Pickup stops in visiting order.
    pub fn pickups(&self) -> impl Iterator<Item = &RouteStop> {
        self.stops.iter().filter(|stop| stop.is_pickup())
    }

    /// Terminal activity stop.
    #[must_use]
    pub fn activity_stop(&self) -> Option<&RouteStop> {
        self.stops.last().filter(|stop| !stop.is_pickup())
    }

    /// Guest identifiers in visiting order.
    #[must_use]
    pub fn guest_ids(&self) -> Vec<&str> {
        self.stops.iter().filter_map(RouteStop::guest_id).collect()
    }

    /// Number of pickups tagged late.
    #[must_use]
    pub fn late_pickups(&self) -> usize {
        self.pickups()
            .filter(|stop| stop.compliance == Compliance::Late)
            .count()
    }

    /// Arrival time at the activity.
    #[must_use]
    pub fn arrival(&self) -> Option<ClockTime> {
        self.activity_stop().map(|stop| stop.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Zone::Rural, SequencingStrategy::AngularSweep)]
    #[case(Zone::DenseUrban, SequencingStrategy::TimeWindow)]
    #[case(Zone::TouristHotspot, SequencingStrategy::NearestNeighbour)]
    #[case(Zone::Generic, SequencingStrategy::NearestNeighbour)]
    fn strategy_follows_zone(#[case] zone: Zone, #[case] expected: SequencingStrategy) {
        assert_eq!(SequencingStrategy::for_zone(zone), expected);
    }

    #[rstest]
    fn strategy_parses_labels() {
        for strategy in SequencingStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<SequencingStrategy>(), Ok(strategy));
        }
        assert!("fastest".parse::<SequencingStrategy>().is_err());
    }

    #[rstest]
    fn stops_serialise_with_flattened_kind() {
        let stop = RouteStop {
            kind: StopKind::Activity { name: None },
            location: LatLng::new(24.39, 124.14).expect("valid"),
            time: ClockTime::from_minutes(570),
            distance_from_previous_km: 3.0,
            travel_minutes: 11.5,
            compliance: Compliance::OnTime,
            deviation_minutes: 0,
            nudged: false,
            advisory_delay_minutes: None,
        };
        let value = serde_json::to_value(&stop).expect("serialise");
        assert_eq!(value["kind"], "activity");
        assert_eq!(value["time"], "09:30");
        assert_eq!(value["compliance"], "on_time");
        assert!(stop.guest_id().is_none());
    }
}
