//! Zone-speed travel-time model.

use serde::{Deserialize, Serialize};

use super::error::ZoneSpeedConfigError;
use crate::geo_metrics::{LatLng, distance_km};
use crate::weather::WeatherImpact;
use crate::zone::Zone;

/// Driving time between two points.
///
/// Implementations must return zero for identical points, a positive value
/// for distinct points, and a value that never decreases as
/// [`WeatherImpact::delay_factor`] grows. Estimators must be `Send + Sync` so
/// routes can be sequenced in parallel.
pub trait TravelTimeEstimator: Send + Sync {
    /// Minutes to drive from `from` to `to` through `zone`.
    fn estimate_minutes(&self, from: LatLng, to: LatLng, zone: Zone, impact: &WeatherImpact)
    -> f64;
}

/// Base speeds and overheads for [`ZoneSpeedEstimator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSpeedConfig {
    /// Town centre speed in km/h.
    pub dense_urban_kmh: f64,
    /// Resort area speed in km/h.
    pub tourist_hotspot_kmh: f64,
    /// Open road speed in km/h.
    pub rural_kmh: f64,
    /// Speed elsewhere in km/h.
    pub generic_kmh: f64,
    /// Constant minutes added to every leg for parking and manoeuvring.
    pub fixed_overhead_minutes: f64,
    /// Minutes added per kilometre for signals and junctions.
    pub per_km_overhead_minutes: f64,
    /// Floor for legs between distinct points.
    pub minimum_minutes: f64,
}

impl Default for ZoneSpeedConfig {
    fn default() -> Self {
        Self {
            dense_urban_kmh: 25.0,
            tourist_hotspot_kmh: 30.0,
            rural_kmh: 45.0,
            generic_kmh: 35.0,
            fixed_overhead_minutes: 2.0,
            per_km_overhead_minutes: 1.5,
            minimum_minutes: 3.0,
        }
    }
}

impl ZoneSpeedConfig {
    /// Base speed for `zone` in km/h.
    #[must_use]
    pub const fn speed_kmh(&self, zone: Zone) -> f64 {
        match zone {
            Zone::DenseUrban => self.dense_urban_kmh,
            Zone::TouristHotspot => self.tourist_hotspot_kmh,
            Zone::Rural => self.rural_kmh,
            Zone::Generic => self.generic_kmh,
        }
    }

    /// Reject non-positive speeds and negative overheads.
    ///
    /// # Errors
    /// Returns the first offending field as a [`ZoneSpeedConfigError`].
    pub fn validate(&self) -> Result<(), ZoneSpeedConfigError> {
        for zone in Zone::ALL {
            let speed_kmh = self.speed_kmh(zone);
            if !speed_kmh.is_finite() || speed_kmh <= 0.0 {
                return Err(ZoneSpeedConfigError::NonPositiveSpeed { zone, speed_kmh });
            }
        }
        for (field, value) in [
            ("fixed_overhead_minutes", self.fixed_overhead_minutes),
            ("per_km_overhead_minutes", self.per_km_overhead_minutes),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ZoneSpeedConfigError::NegativeOverhead { field, value });
            }
        }
        if !self.minimum_minutes.is_finite() || self.minimum_minutes <= 0.0 {
            return Err(ZoneSpeedConfigError::NonPositiveMinimum(self.minimum_minutes));
        }
        Ok(())
    }
}

/// Default estimator: `distance / speed × delay + overhead`, floored.
///
/// # Examples
/// ```
/// use shuttle_core::{LatLng, TravelTimeEstimator, WeatherImpact, Zone, ZoneSpeedEstimator};
///
/// let estimator = ZoneSpeedEstimator::default();
/// let a = LatLng::new(24.3336, 124.1543).expect("valid");
/// let b = LatLng::new(24.3500, 124.1600).expect("valid");
/// let calm = WeatherImpact { delay_factor: 1.0, ..WeatherImpact::neutral() };
/// let minutes = estimator.estimate_minutes(a, b, Zone::DenseUrban, &calm);
/// assert!(minutes >= 3.0);
/// assert_eq!(estimator.estimate_minutes(a, a, Zone::DenseUrban, &calm), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneSpeedEstimator {
    config: ZoneSpeedConfig,
}

impl ZoneSpeedEstimator {
    /// Build an estimator from a validated configuration.
    ///
    /// # Errors
    /// Propagates [`ZoneSpeedConfig::validate`] failures.
    pub fn new(config: ZoneSpeedConfig) -> Result<Self, ZoneSpeedConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &ZoneSpeedConfig {
        &self.config
    }
}

impl TravelTimeEstimator for ZoneSpeedEstimator {
    #[expect(clippy::float_arithmetic, reason = "travel time arithmetic")]
    fn estimate_minutes(
        &self,
        from: LatLng,
        to: LatLng,
        zone: Zone,
        impact: &WeatherImpact,
    ) -> f64 {
        let km = distance_km(from, to);
        if km <= 0.0 {
            return 0.0;
        }
        let delay = if impact.delay_factor.is_finite() {
            impact.delay_factor.max(1.0)
        } else {
            1.0
        };
        let driving = km / self.config.speed_kmh(zone) * 60.0 * delay;
        let overhead =
            self.config.fixed_overhead_minutes + self.config.per_km_overhead_minutes * km;
        (driving + overhead).max(self.config.minimum_minutes)
    }
}
