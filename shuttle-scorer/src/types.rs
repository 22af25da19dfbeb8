//! Public configuration for efficiency scoring and recommendations.

use serde::{Deserialize, Serialize};

use crate::error::ScoreWeightsError;

/// Relative weighting of score components.
///
/// Route and fleet groups are each normalised by their total, so scores stay
/// in `[0, 100]` whatever the absolute magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Route: seats used over capacity.
    pub utilisation: f64,
    /// Route: distance against the baseline.
    pub distance: f64,
    /// Route: share of on-time pickups.
    pub compliance: f64,
    /// Fleet: passengers over total fleet capacity.
    pub fleet_utilisation: f64,
    /// Fleet: share of vehicles used.
    pub fleet_vehicles_used: f64,
    /// Fleet: total distance against the per-vehicle baseline.
    pub fleet_distance: f64,
    /// Fleet: share of guests served.
    pub fleet_coverage: f64,
    /// Kilometres a single route may cover before losing distance efficiency.
    pub baseline_distance_km: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            utilisation: 0.4,
            distance: 0.3,
            compliance: 0.3,
            fleet_utilisation: 0.3,
            fleet_vehicles_used: 0.1,
            fleet_distance: 0.4,
            fleet_coverage: 0.2,
            baseline_distance_km: 20.0,
        }
    }
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoreWeightsError`] when a weight is negative or not finite,
    /// a group sums to zero, or the baseline is not positive.
    pub fn validate(self) -> Result<Self, ScoreWeightsError> {
        let fields = [
            ("utilisation", self.utilisation),
            ("distance", self.distance),
            ("compliance", self.compliance),
            ("fleet_utilisation", self.fleet_utilisation),
            ("fleet_vehicles_used", self.fleet_vehicles_used),
            ("fleet_distance", self.fleet_distance),
            ("fleet_coverage", self.fleet_coverage),
        ];
        if let Some(&(field, value)) = fields
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(ScoreWeightsError::InvalidWeight { field, value });
        }
        if self.route_total() <= 0.0 {
            return Err(ScoreWeightsError::ZeroTotal { group: "route" });
        }
        if self.fleet_total() <= 0.0 {
            return Err(ScoreWeightsError::ZeroTotal { group: "fleet" });
        }
        if !self.baseline_distance_km.is_finite() || self.baseline_distance_km <= 0.0 {
            return Err(ScoreWeightsError::InvalidBaseline(self.baseline_distance_km));
        }
        Ok(self)
    }

    #[expect(clippy::float_arithmetic, reason = "sums weights for normalisation")]
    pub(crate) fn route_total(self) -> f64 {
        self.utilisation + self.distance + self.compliance
    }

    #[expect(clippy::float_arithmetic, reason = "sums weights for normalisation")]
    pub(crate) fn fleet_total(self) -> f64 {
        self.fleet_utilisation + self.fleet_vehicles_used + self.fleet_distance + self.fleet_coverage
    }
}

/// Cut-offs that trigger recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
    /// Overall scores below this suggest re-clustering.
    pub low_efficiency: f64,
    /// Overall scores at or above this earn a confirmation.
    pub excellent_efficiency: f64,
    /// Route utilisation below this flags an under-used vehicle.
    pub under_utilisation: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            low_efficiency: 60.0,
            excellent_efficiency: 80.0,
            under_utilisation: 0.5,
        }
    }
}

impl RecommendationThresholds {
    /// Validate the thresholds and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoreWeightsError::InvalidThreshold`] when a score cut-off is
    /// outside `[0, 100]`, the low cut-off exceeds the excellent one, or the
    /// utilisation cut-off is outside `[0, 1]`.
    pub fn validate(self) -> Result<Self, ScoreWeightsError> {
        for (field, value) in [
            ("low_efficiency", self.low_efficiency),
            ("excellent_efficiency", self.excellent_efficiency),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ScoreWeightsError::InvalidThreshold { field, value });
            }
        }
        if self.low_efficiency > self.excellent_efficiency {
            return Err(ScoreWeightsError::InvalidThreshold {
                field: "low_efficiency",
                value: self.low_efficiency,
            });
        }
        if !(0.0..=1.0).contains(&self.under_utilisation) {
            return Err(ScoreWeightsError::InvalidThreshold {
                field: "under_utilisation",
                value: self.under_utilisation,
            });
        }
        Ok(self)
    }
}
