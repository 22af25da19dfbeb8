//! Route and fleet efficiency scores.

use shuttle_core::{Compliance, RouteEfficiency, Vehicle, VehicleRoute};

use crate::error::ScoreWeightsError;
use crate::types::{RecommendationThresholds, ScoreWeights};

/// Fleet-level inputs the routes alone cannot provide.
#[derive(Debug, Clone, Copy)]
pub struct FleetContext<'a> {
    /// Every vehicle offered to the dispatcher, used or not.
    pub vehicles: &'a [Vehicle],
    /// Seats requested across every guest party.
    pub requested_seats: u64,
}

/// Scores routes and fleets and derives recommendations.
///
/// # Examples
/// ```
/// use shuttle_scorer::EfficiencyScorer;
///
/// let scorer = EfficiencyScorer::default();
/// assert!((scorer.distance_efficiency(10.0) - 1.0).abs() < 1e-12);
/// assert!((scorer.distance_efficiency(40.0) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EfficiencyScorer {
    pub(crate) weights: ScoreWeights,
    pub(crate) thresholds: RecommendationThresholds,
}

impl EfficiencyScorer {
    /// Build a scorer from validated settings.
    ///
    /// # Errors
    /// Propagates [`ScoreWeights::validate`] and
    /// [`RecommendationThresholds::validate`] failures.
    pub fn new(
        weights: ScoreWeights,
        thresholds: RecommendationThresholds,
    ) -> Result<Self, ScoreWeightsError> {
        Ok(Self {
            weights: weights.validate()?,
            thresholds: thresholds.validate()?,
        })
    }

    /// Active weights.
    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Active thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> RecommendationThresholds {
        self.thresholds
    }

    /// One within the baseline, `baseline / distance` beyond it.
    #[must_use]
    pub fn distance_efficiency(&self, distance_km: f64) -> f64 {
        decay(distance_km, self.weights.baseline_distance_km)
    }

    /// Score one route.
    ///
    /// Utilisation is capped at one so overflow never inflates the score.
    /// A route without pickups counts as fully compliant.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "weighted score blend")]
    pub fn score_route(&self, route: &VehicleRoute) -> RouteEfficiency {
        let capacity_utilisation = if route.capacity == 0 {
            0.0
        } else {
            (f64::from(route.passenger_count) / f64::from(route.capacity)).min(1.0)
        };
        let distance_efficiency = self.distance_efficiency(route.total_distance_km);
        let pickups = route.pickups().count();
        let on_time = route
            .pickups()
            .filter(|stop| stop.compliance == Compliance::OnTime)
            .count();
        let compliance = if pickups == 0 {
            1.0
        } else {
            ratio(on_time, pickups)
        };
        let w = self.weights;
        let blended = w.utilisation * capacity_utilisation
            + w.distance * distance_efficiency
            + w.compliance * compliance;
        RouteEfficiency {
            score: clamp_score(100.0 * blended / w.route_total()),
            capacity_utilisation,
            distance_efficiency,
            compliance,
        }
    }

    /// Score the whole fleet.
    ///
    /// Blends seats filled over total fleet capacity, the share of vehicles
    /// used, total distance against one baseline per used vehicle, and seats
    /// filled over seats requested. Seat totals are summed as `u64`. No
    /// routes scores zero.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "weighted score blend")]
    pub fn score_fleet(&self, routes: &[VehicleRoute], context: FleetContext<'_>) -> f64 {
        if routes.is_empty() {
            return 0.0;
        }
        let passengers: u64 = routes
            .iter()
            .map(|route| u64::from(route.passenger_count))
            .sum();
        let capacity: u64 = context
            .vehicles
            .iter()
            .map(|vehicle| u64::from(vehicle.capacity))
            .sum();
        let utilisation = seat_ratio(passengers, capacity).min(1.0);
        let vehicles_used = ratio(routes.len(), context.vehicles.len()).min(1.0);
        let total_distance: f64 = routes.iter().map(|route| route.total_distance_km).sum();
        let baseline = self.weights.baseline_distance_km * count(routes.len());
        let distance = decay(total_distance, baseline);
        let coverage = if context.requested_seats == 0 {
            1.0
        } else {
            seat_ratio(passengers, context.requested_seats).min(1.0)
        };
        let w = self.weights;
        let blended = w.fleet_utilisation * utilisation
            + w.fleet_vehicles_used * vehicles_used
            + w.fleet_distance * distance
            + w.fleet_coverage * coverage;
        clamp_score(100.0 * blended / w.fleet_total())
    }
}

#[expect(clippy::float_arithmetic, reason = "inverse decay beyond baseline")]
fn decay(distance: f64, baseline: f64) -> f64 {
    if !distance.is_finite() || distance <= baseline {
        1.0
    } else {
        baseline / distance
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "guest and vehicle counts are far below 2^52"
)]
pub(crate) fn count(n: usize) -> f64 {
    n as f64
}

#[expect(
    clippy::cast_precision_loss,
    reason = "seat totals stay exact below 2^53"
)]
fn seats(n: u64) -> f64 {
    n as f64
}

#[expect(clippy::float_arithmetic, reason = "share of a seat total")]
fn seat_ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        seats(part) / seats(whole)
    }
}

#[expect(clippy::float_arithmetic, reason = "share of a count")]
pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        count(part) / count(whole)
    }
}
