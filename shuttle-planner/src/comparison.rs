//! Side-by-side runs of every sequencing heuristic.

use serde::Serialize;
use shuttle_core::{OptimizeError, OptimizeRequest, SequencingStrategy, TravelTimeEstimator};

use crate::dispatcher::HeuristicDispatcher;

/// Outcome of one forced-strategy run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySummary {
    /// Heuristic applied to every vehicle.
    pub strategy: SequencingStrategy,
    /// Kilometres across all routes.
    pub total_distance_km: f64,
    /// In-vehicle minutes across all routes.
    pub total_duration_minutes: f64,
    /// Fleet score in `[0, 100]`.
    pub overall_efficiency: f64,
    /// Pickups tagged late.
    pub late_pickups: usize,
}

/// All summaries and the preferred heuristic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyComparison {
    /// One entry per strategy in [`SequencingStrategy::ALL`] order.
    pub summaries: Vec<StrategySummary>,
    /// Highest score, ties to shorter distance then fixed order; `None`
    /// when there was nothing to dispatch.
    pub best: Option<SequencingStrategy>,
}

impl<T: TravelTimeEstimator> HeuristicDispatcher<T> {
    /// Dispatch the request once per strategy with that strategy forced on
    /// every vehicle.
    ///
    /// # Errors
    /// Returns the first structural error; every run sees the same request,
    /// so a failure in one is a failure in all.
    pub fn compare_strategies(
        &self,
        request: &OptimizeRequest,
    ) -> Result<StrategyComparison, OptimizeError> {
        let summaries = SequencingStrategy::ALL
            .into_iter()
            .map(|strategy| {
                let result = self.run(request, Some(strategy), None)?;
                Ok(StrategySummary {
                    strategy,
                    total_distance_km: result.total_distance_km,
                    total_duration_minutes: result.total_duration_minutes,
                    overall_efficiency: result.overall_efficiency,
                    late_pickups: result.late_pickups(),
                })
            })
            .collect::<Result<Vec<_>, OptimizeError>>()?;
        let best = if request.guests.is_empty() {
            None
        } else {
            summaries
                .iter()
                .reduce(|best, candidate| {
                    let better = candidate
                        .overall_efficiency
                        .total_cmp(&best.overall_efficiency)
                        .then_with(|| best.total_distance_km.total_cmp(&candidate.total_distance_km))
                        .is_gt();
                    if better { candidate } else { best }
                })
                .map(|summary| summary.strategy)
        };
        if let Some(strategy) = best {
            log::debug!("best sequencing strategy: {strategy}");
        }
        Ok(StrategyComparison { summaries, best })
    }
}
