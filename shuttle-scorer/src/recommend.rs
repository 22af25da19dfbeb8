//! Operator-facing advice derived from scores, warnings and weather.

use shuttle_core::{
    DispatchWarning, VehicleRoute, WeatherImpact, WeatherRecommendation,
};

use crate::efficiency::{EfficiencyScorer, FleetContext};

/// Everything recommendation rules look at.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationInput<'a> {
    /// Scored routes in vehicle order.
    pub routes: &'a [VehicleRoute],
    /// Fleet context used for the overall score.
    pub fleet: FleetContext<'a>,
    /// Overall fleet score.
    pub overall_efficiency: f64,
    /// Evaluated weather.
    pub weather: &'a WeatherImpact,
    /// Soft anomalies raised while sequencing.
    pub warnings: &'a [DispatchWarning],
}

impl EfficiencyScorer {
    /// Derive recommendations in a fixed order: fleet efficiency, per-vehicle
    /// lateness and overflow, weather, utilisation, idle vehicles, then the
    /// confirmation for excellent plans.
    #[must_use]
    pub fn recommend(&self, input: &RecommendationInput<'_>) -> Vec<String> {
        let mut advice = Vec::new();
        if input.routes.is_empty() {
            return advice;
        }
        let t = self.thresholds;
        if input.overall_efficiency < t.low_efficiency {
            advice.push(format!(
                "overall efficiency {:.1} is below {:.0}: consider re-clustering guests by area",
                input.overall_efficiency, t.low_efficiency
            ));
        }
        for route in input.routes {
            let late = route.late_pickups();
            if late > 0 {
                advice.push(format!(
                    "{}: {late} pickup(s) late, depart earlier",
                    route.vehicle_id
                ));
            }
        }
        for warning in input.warnings {
            match warning {
                DispatchWarning::CapacityOverflow {
                    vehicle_id,
                    overflow,
                } => advice.push(format!(
                    "{vehicle_id} is over capacity by {overflow} seat(s): add a vehicle or move guests"
                )),
                DispatchWarning::LateArrival {
                    vehicle_id,
                    minutes_late,
                } => advice.push(format!(
                    "{vehicle_id} reaches the activity {minutes_late} min after it starts: depart earlier"
                )),
                DispatchWarning::TightArrival {
                    vehicle_id,
                    minutes_to_spare,
                } => advice.push(format!(
                    "{vehicle_id} reaches the activity with only {minutes_to_spare} min to spare"
                )),
                DispatchWarning::LatePickup { .. } | DispatchWarning::DegradedWeather => {}
            }
        }
        advice.extend(weather_advice(input.weather));
        for route in input.routes {
            let utilisation = route.efficiency.capacity_utilisation;
            if utilisation < t.under_utilisation {
                advice.push(format!(
                    "{} is {:.0}% full: consider merging with a nearby vehicle",
                    route.vehicle_id,
                    percent(utilisation)
                ));
            }
        }
        let idle: Vec<&str> = input
            .fleet
            .vehicles
            .iter()
            .map(|vehicle| vehicle.id.as_str())
            .filter(|id| input.routes.iter().all(|route| route.vehicle_id != *id))
            .collect();
        if !idle.is_empty() {
            advice.push(format!(
                "{} vehicle(s) unused: {}",
                idle.len(),
                idle.join(", ")
            ));
        }
        if input.overall_efficiency >= t.excellent_efficiency {
            advice.push("efficient plan: no changes needed".to_owned());
        }
        advice
    }
}

fn weather_advice(weather: &WeatherImpact) -> Vec<String> {
    let mut advice = Vec::new();
    match weather.recommendation {
        WeatherRecommendation::NormalWindow => {}
        WeatherRecommendation::ConsiderPostponing => {
            advice.push("weather: consider postponing marine activities".to_owned());
        }
        WeatherRecommendation::FavorEarlyDeparture => {
            advice.push("weather: favour an early departure".to_owned());
        }
        WeatherRecommendation::FavorAfternoon => {
            advice.push("weather: cool calm morning, later departures are more pleasant".to_owned());
        }
    }
    advice.extend(weather.advisories.iter().map(|note| format!("weather: {note}")));
    advice
}

#[expect(clippy::float_arithmetic, reason = "fraction to percentage")]
fn percent(fraction: f64) -> f64 {
    fraction * 100.0
}
