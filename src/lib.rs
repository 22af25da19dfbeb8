//! Facade crate for the shuttle pickup dispatch engine.
//!
//! This crate re-exports the core domain types and exposes the scorer and the
//! heuristic planner behind feature flags.

#![forbid(unsafe_code)]

pub use shuttle_core::{
    ActivityLocation, ClockTime, Compliance, DelayAdvisor, Dispatcher, DispatchWarning, Guest,
    LatLng, OptimizationResult, OptimizeError, OptimizeRequest, RouteStop, SequencingStrategy,
    TimeWindow, TravelTimeEstimator, Vehicle, VehicleRoute, WeatherImpact, WeatherSnapshot, Zone,
    ZoneMap, ZoneSpeedEstimator,
};

#[cfg(feature = "scorer")]
pub use shuttle_scorer::{EfficiencyScorer, RunStatistics, ScoreWeights};

#[cfg(feature = "planner")]
pub use shuttle_planner::{
    DispatcherConfig, HeuristicDispatcher, StrategyComparison, StrategySummary,
};
