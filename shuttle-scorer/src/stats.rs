//! Caller-owned accumulator of dispatch outcomes.
//!
//! The engine keeps no process-wide state; services and the CLI feed a
//! [`RunStatistics`] from the results they receive.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shuttle_core::{OptimizationResult, SequencingStrategy};

/// Running totals across dispatch calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    successes: u64,
    failures: u64,
    total_solve_time: Duration,
    best_score: Option<f64>,
    strategy_usage: BTreeMap<SequencingStrategy, u64>,
}

impl RunStatistics {
    /// Empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful run and how long it took.
    pub fn record_success(&mut self, result: &OptimizationResult, elapsed: Duration) {
        self.successes = self.successes.saturating_add(1);
        self.total_solve_time = self.total_solve_time.saturating_add(elapsed);
        if !result.routes.is_empty() {
            let score = result.overall_efficiency;
            self.best_score = Some(self.best_score.map_or(score, |best| best.max(score)));
        }
        for route in &result.routes {
            let used = self.strategy_usage.entry(route.strategy).or_default();
            *used = used.saturating_add(1);
        }
    }

    /// Record a failed run.
    pub fn record_failure(&mut self, elapsed: Duration) {
        self.failures = self.failures.saturating_add(1);
        self.total_solve_time = self.total_solve_time.saturating_add(elapsed);
    }

    /// Successful runs.
    #[must_use]
    pub const fn successes(&self) -> u64 {
        self.successes
    }

    /// Failed runs.
    #[must_use]
    pub const fn failures(&self) -> u64 {
        self.failures
    }

    /// All runs.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.successes.saturating_add(self.failures)
    }

    /// Share of runs that succeeded, zero before any run.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "run counts stay far below 2^52"
    )]
    pub fn success_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.successes as f64 / total as f64,
        }
    }

    /// Mean wall-clock time per run.
    #[must_use]
    pub fn mean_solve_time(&self) -> Duration {
        u32::try_from(self.total())
            .ok()
            .filter(|&runs| runs > 0)
            .map_or(Duration::ZERO, |runs| self.total_solve_time / runs)
    }

    /// Highest overall efficiency seen for a non-empty plan.
    #[must_use]
    pub const fn best_score(&self) -> Option<f64> {
        self.best_score
    }

    /// Routes sequenced per strategy.
    #[must_use]
    pub const fn strategy_usage(&self) -> &BTreeMap<SequencingStrategy, u64> {
        &self.strategy_usage
    }
}
