//! Caller-supplied weather readings.

use serde::{Deserialize, Serialize};

/// Qualitative visibility category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Clear skies.
    Excellent,
    /// Light haze.
    Good,
    /// Rain or mist.
    Moderate,
    /// Heavy rain or fog.
    Poor,
}

/// Current conditions at the service area.
///
/// Every reading is optional so partial provider responses can be passed
/// through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Sustained wind speed in km/h.
    #[serde(default)]
    pub wind_speed_kmh: Option<f64>,
    /// Significant wave height in metres.
    #[serde(default)]
    pub wave_height_m: Option<f64>,
    /// Visibility category.
    #[serde(default)]
    pub visibility: Option<Visibility>,
    /// Air temperature in degrees Celsius.
    #[serde(default)]
    pub temperature_c: Option<f64>,
}

impl WeatherSnapshot {
    /// A complete snapshot.
    #[must_use]
    pub const fn new(
        wind_speed_kmh: f64,
        wave_height_m: f64,
        visibility: Visibility,
        temperature_c: f64,
    ) -> Self {
        Self {
            wind_speed_kmh: Some(wind_speed_kmh),
            wave_height_m: Some(wave_height_m),
            visibility: Some(visibility),
            temperature_c: Some(temperature_c),
        }
    }

    /// Calm, clear and mild conditions.
    #[must_use]
    pub const fn calm() -> Self {
        Self::new(8.0, 0.5, Visibility::Excellent, 26.0)
    }

    /// True when a present reading is physically impossible.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        let bad_magnitude = |v: Option<f64>| v.is_some_and(|x| !x.is_finite() || x < 0.0);
        let bad_temperature = self
            .temperature_c
            .is_some_and(|t| !t.is_finite() || !(-60.0..=60.0).contains(&t));
        bad_magnitude(self.wind_speed_kmh) || bad_magnitude(self.wave_height_m) || bad_temperature
    }
}
