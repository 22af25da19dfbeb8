//! Heuristic dispatch pipeline.
//!
//! Weather is evaluated once, guests are assigned once, each non-empty
//! vehicle is sequenced independently on the rayon pool, and the scorer turns
//! the routes into a fleet score and advice. Routes are collected in vehicle
//! identifier order so identical requests produce identical results.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use shuttle_core::{
    DelayAdvisor, Diagnostics, DispatchWarning, Dispatcher, OptimizationResult, OptimizeError,
    OptimizeRequest, SequencingStrategy, TravelTimeEstimator, WeatherImpact, ZoneMap,
    ZoneSpeedEstimator, evaluate,
};
use shuttle_scorer::{EfficiencyScorer, FleetContext, RecommendationInput};

use crate::assignment::{VehicleAssignment, plan_assignments};
use crate::config::{DispatcherConfig, DispatcherConfigError};
use crate::sequencing::{RouteSequencer, SequencedRoute};

/// Default [`Dispatcher`]: greedy assignment, zone-aware sequencing and
/// weighted scoring.
///
/// # Examples
/// ```
/// use shuttle_core::test_support::{activity, guest, vehicle};
/// use shuttle_core::{Dispatcher, OptimizeRequest};
/// use shuttle_planner::HeuristicDispatcher;
///
/// let request = OptimizeRequest::new(
///     vec![guest("g1", 2, (24.3336, 124.1543))],
///     vec![vehicle("v1", 4, (24.3400, 124.1550))],
///     activity((24.3900, 124.1400), "09:30"),
///     None,
/// );
/// let result = HeuristicDispatcher::default()
///     .optimize(&request)
///     .expect("dispatch succeeds");
/// assert_eq!(result.routes.len(), 1);
/// assert_eq!(result.guests_served(), 1);
/// ```
pub struct HeuristicDispatcher<T: TravelTimeEstimator = ZoneSpeedEstimator> {
    estimator: T,
    config: DispatcherConfig,
    scorer: EfficiencyScorer,
    zones: ZoneMap,
    advisor: Option<Arc<dyn DelayAdvisor>>,
}

impl Default for HeuristicDispatcher {
    fn default() -> Self {
        Self::new(ZoneSpeedEstimator::default())
    }
}

impl<T: TravelTimeEstimator> HeuristicDispatcher<T> {
    /// Dispatcher with default configuration, scoring and zones.
    pub fn new(estimator: T) -> Self {
        Self {
            estimator,
            config: DispatcherConfig::default(),
            scorer: EfficiencyScorer::default(),
            zones: ZoneMap::default(),
            advisor: None,
        }
    }

    /// Replace the scheduling configuration.
    ///
    /// # Errors
    /// Returns [`DispatcherConfigError`] when the configuration is invalid.
    pub fn with_config(mut self, config: DispatcherConfig) -> Result<Self, DispatcherConfigError> {
        self.config = config.validate()?;
        Ok(self)
    }

    /// Replace the scorer.
    #[must_use]
    pub const fn with_scorer(mut self, scorer: EfficiencyScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Replace the zone map.
    #[must_use]
    pub fn with_zones(mut self, zones: ZoneMap) -> Self {
        self.zones = zones;
        self
    }

    /// Annotate pickups with advice from `advisor`.
    #[must_use]
    pub fn with_advisor(mut self, advisor: Arc<dyn DelayAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    /// Active scheduling configuration.
    #[must_use]
    pub const fn config(&self) -> DispatcherConfig {
        self.config
    }

    /// Active scorer.
    #[must_use]
    pub const fn scorer(&self) -> &EfficiencyScorer {
        &self.scorer
    }

    /// Run the pipeline, checking `cancel` before each vehicle is sequenced.
    ///
    /// # Errors
    /// Returns [`OptimizeError::Cancelled`] once the flag is observed set,
    /// plus every structural error of [`Dispatcher::optimize`].
    pub fn optimize_with_cancel(
        &self,
        request: &OptimizeRequest,
        cancel: &AtomicBool,
    ) -> Result<OptimizationResult, OptimizeError> {
        self.run(request, self.config.strategy_override, Some(cancel))
    }

    pub(crate) fn run(
        &self,
        request: &OptimizeRequest,
        strategy_override: Option<SequencingStrategy>,
        cancel: Option<&AtomicBool>,
    ) -> Result<OptimizationResult, OptimizeError> {
        request.validate()?;
        let started_at = Instant::now();
        let cancelled = || cancel.is_some_and(|flag| flag.load(Ordering::Relaxed));

        let impact = request
            .weather
            .as_ref()
            .map_or_else(WeatherImpact::neutral, evaluate);
        let mut warnings = Vec::new();
        if impact.degraded {
            log::warn!("weather readings missing or unusable; using {:?}", impact.advisories);
            warnings.push(DispatchWarning::DegradedWeather);
        }

        if request.guests.is_empty() {
            log::debug!("no guests to dispatch");
            let mut result = OptimizationResult::empty(impact, request.vehicles.len());
            result.warnings = warnings;
            return Ok(result);
        }

        let requested_seats = request.total_party_size();
        log::debug!(
            "{requested_seats} seat(s) requested against {} available",
            request.total_capacity()
        );
        let plan = plan_assignments(&request.guests, &request.vehicles)?;
        let slots: Vec<&VehicleAssignment<'_>> = plan.non_empty().collect();
        let sequencer = RouteSequencer {
            estimator: &self.estimator,
            impact: &impact,
            zones: &self.zones,
            config: self.config.with_strategy(strategy_override),
            activity: &request.activity,
            advisor: self.advisor.as_deref(),
        };
        let sequenced: Vec<SequencedRoute> = slots
            .par_iter()
            .map(|slot| {
                if cancelled() {
                    return Err(OptimizeError::Cancelled);
                }
                Ok(sequencer.sequence(slot))
            })
            .collect::<Result<_, _>>()?;

        let mut routes = Vec::with_capacity(sequenced.len());
        for SequencedRoute {
            mut route,
            warnings: route_warnings,
        } in sequenced
        {
            route.efficiency = self.scorer.score_route(&route);
            warnings.extend(route_warnings);
            routes.push(route);
        }

        let fleet = FleetContext {
            vehicles: &request.vehicles,
            requested_seats,
        };
        let overall_efficiency = self.scorer.score_fleet(&routes, fleet);
        let recommendations = self.scorer.recommend(&RecommendationInput {
            routes: &routes,
            fleet,
            overall_efficiency,
            weather: &impact,
            warnings: &warnings,
        });
        let diagnostics = Diagnostics {
            guests: request.guests.len(),
            vehicles: request.vehicles.len(),
            phase_one_assignments: plan.phase_one,
            forced_assignments: plan.forced,
            vehicles_used: routes.len(),
        };
        let total_distance_km: f64 = routes.iter().map(|route| route.total_distance_km).sum();
        let total_duration_minutes: f64 = routes
            .iter()
            .map(|route| route.total_duration_minutes)
            .sum();
        log::info!(
            "dispatched {} guest(s) on {} vehicle(s): {total_distance_km:.1} km, score {overall_efficiency:.1}, {} warning(s) in {:?}",
            diagnostics.guests,
            diagnostics.vehicles_used,
            warnings.len(),
            started_at.elapsed()
        );
        Ok(OptimizationResult {
            routes,
            total_distance_km,
            total_duration_minutes,
            overall_efficiency,
            recommendations,
            weather: impact,
            warnings,
            diagnostics,
        })
    }
}

impl<T: TravelTimeEstimator> Dispatcher for HeuristicDispatcher<T> {
    fn optimize(&self, request: &OptimizeRequest) -> Result<OptimizationResult, OptimizeError> {
        self.run(request, self.config.strategy_override, None)
    }
}
