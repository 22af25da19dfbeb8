//! Threshold bands mapping readings to delay, comfort and advice.

use serde::{Deserialize, Serialize};

use super::snapshot::{Visibility, WeatherSnapshot};

const STRONG_WIND_KMH: f64 = 25.0;
const SEVERE_WIND_KMH: f64 = 40.0;
const HIGH_WAVE_M: f64 = 1.5;
const SEVERE_WAVE_M: f64 = 2.5;
const HOT_C: f64 = 32.0;
const COLD_C: f64 = 15.0;
const COOL_MORNING_C: f64 = 18.0;
const COMFORT_FLOOR: f64 = 0.3;
const NEUTRAL_COMFORT: f64 = 0.8;

/// Qualitative advice on departure timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherRecommendation {
    /// No timing change needed.
    NormalWindow,
    /// Leave earlier to beat wind, swell or heat.
    FavorEarlyDeparture,
    /// Cool calm morning; later starts are more pleasant.
    FavorAfternoon,
    /// Marine conditions are severe.
    ConsiderPostponing,
}

impl WeatherRecommendation {
    /// Return the recommendation as a `snake_case` label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NormalWindow => "normal_window",
            Self::FavorEarlyDeparture => "favor_early_departure",
            Self::FavorAfternoon => "favor_afternoon",
            Self::ConsiderPostponing => "consider_postponing",
        }
    }
}

/// Overall severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactLevel {
    /// Little or no effect.
    Low,
    /// Noticeable slow-down or discomfort.
    Medium,
    /// Severe conditions.
    High,
}

/// Effect of weather on travel and guest comfort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherImpact {
    /// Multiplier on driving time, at least `1.0`.
    pub delay_factor: f64,
    /// Guest comfort in `[0.3, 1.0]`.
    pub comfort_factor: f64,
    /// Departure timing advice.
    pub recommendation: WeatherRecommendation,
    /// Severity band.
    pub level: ImpactLevel,
    /// Human-readable notes for operators.
    pub advisories: Vec<String>,
    /// Set when readings were missing or malformed.
    pub degraded: bool,
}

impl WeatherImpact {
    /// Impact used when no usable readings exist.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            delay_factor: 1.0,
            comfort_factor: NEUTRAL_COMFORT,
            recommendation: WeatherRecommendation::NormalWindow,
            level: ImpactLevel::Low,
            advisories: vec![
                "weather data unavailable: using neutral travel assumptions".to_owned(),
            ],
            degraded: true,
        }
    }
}

impl Default for WeatherImpact {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Evaluate a snapshot.
///
/// Wind, waves, visibility and temperature are all required. A snapshot
/// missing any of them, or holding an impossible reading, yields
/// [`WeatherImpact::neutral`]. `delay_factor` never decreases and
/// `comfort_factor` never increases as wind or waves grow.
///
/// # Examples
/// ```
/// use shuttle_core::{Visibility, WeatherImpact, WeatherRecommendation, WeatherSnapshot, evaluate};
///
/// let calm = evaluate(&WeatherSnapshot::calm());
/// assert_eq!(calm.delay_factor, 1.0);
///
/// let storm = evaluate(&WeatherSnapshot::new(45.0, 3.0, Visibility::Poor, 24.0));
/// assert!(storm.delay_factor > 1.7);
/// assert_eq!(storm.recommendation, WeatherRecommendation::ConsiderPostponing);
///
/// let partial = WeatherSnapshot { temperature_c: Some(26.0), ..WeatherSnapshot::default() };
/// assert_eq!(evaluate(&partial), WeatherImpact::neutral());
/// ```
#[must_use]
pub fn evaluate(snapshot: &WeatherSnapshot) -> WeatherImpact {
    let (Some(wind), Some(wave), Some(visibility), Some(temperature)) = (
        snapshot.wind_speed_kmh,
        snapshot.wave_height_m,
        snapshot.visibility,
        snapshot.temperature_c,
    ) else {
        log::debug!("weather snapshot missing readings: {snapshot:?}");
        return WeatherImpact::neutral();
    };
    if snapshot.is_malformed() {
        log::debug!("weather snapshot holds impossible readings: {snapshot:?}");
        return WeatherImpact::neutral();
    }

    let delay_factor = delay_factor(wind, wave, visibility);
    let comfort_factor = comfort_factor(wind, wave, temperature);
    let recommendation = recommend(wind, wave, temperature);
    let level = if recommendation == WeatherRecommendation::ConsiderPostponing
        || delay_factor >= 1.3
    {
        ImpactLevel::High
    } else if delay_factor > 1.0 || comfort_factor < 0.7 {
        ImpactLevel::Medium
    } else {
        ImpactLevel::Low
    };

    WeatherImpact {
        delay_factor,
        comfort_factor,
        recommendation,
        level,
        advisories: advisories(wind, wave, visibility, temperature),
        degraded: false,
    }
}

#[expect(clippy::float_arithmetic, reason = "additive penalty bands")]
fn delay_factor(wind: f64, wave: f64, visibility: Visibility) -> f64 {
    let mut factor = 1.0;
    if wind > STRONG_WIND_KMH {
        factor += 0.10;
    }
    if wind > SEVERE_WIND_KMH {
        factor += 0.15;
    }
    if wave > HIGH_WAVE_M {
        factor += 0.15;
    }
    if wave > SEVERE_WAVE_M {
        factor += 0.15;
    }
    factor += match visibility {
        Visibility::Poor => 0.20,
        Visibility::Moderate => 0.05,
        Visibility::Good | Visibility::Excellent => 0.0,
    };
    factor
}

#[expect(clippy::float_arithmetic, reason = "subtractive comfort bands")]
fn comfort_factor(wind: f64, wave: f64, temperature: f64) -> f64 {
    let mut comfort: f64 = 1.0;
    if !(COLD_C..=HOT_C).contains(&temperature) {
        comfort -= 0.2;
    }
    if wind > 20.0 {
        comfort -= 0.2;
    }
    if wind > 30.0 {
        comfort -= 0.1;
    }
    if wave > 1.0 {
        comfort -= 0.2;
    }
    if wave > 2.0 {
        comfort -= 0.1;
    }
    comfort.max(COMFORT_FLOOR)
}

fn recommend(wind: f64, wave: f64, temperature: f64) -> WeatherRecommendation {
    if wind >= SEVERE_WIND_KMH || wave >= SEVERE_WAVE_M {
        WeatherRecommendation::ConsiderPostponing
    } else if wind > STRONG_WIND_KMH || wave > HIGH_WAVE_M || temperature > HOT_C {
        WeatherRecommendation::FavorEarlyDeparture
    } else if temperature < COOL_MORNING_C && wind <= 15.0 && wave <= 1.0 {
        WeatherRecommendation::FavorAfternoon
    } else {
        WeatherRecommendation::NormalWindow
    }
}

fn advisories(wind: f64, wave: f64, visibility: Visibility, temperature: f64) -> Vec<String> {
    let mut notes = Vec::new();
    if wind > SEVERE_WIND_KMH {
        notes.push(format!("severe wind ({wind:.0} km/h): marine activities may be cancelled"));
    } else if wind > STRONG_WIND_KMH {
        notes.push(format!("strong wind ({wind:.0} km/h): expect slower driving"));
    }
    if wave > HIGH_WAVE_M {
        notes.push(format!("high waves ({wave:.1} m): allow extra boarding time at the marina"));
    }
    match visibility {
        Visibility::Poor => notes.push("poor visibility: drive at reduced speed".to_owned()),
        Visibility::Moderate => notes.push("rain or haze: roads may be slippery".to_owned()),
        Visibility::Good | Visibility::Excellent => {}
    }
    if temperature > HOT_C {
        notes.push("heat: keep water in the vehicle and limit kerbside waiting".to_owned());
    } else if temperature < COLD_C {
        notes.push("cool conditions: advise guests to bring a layer".to_owned());
    }
    notes
}
