//! Heuristic pickup planning for shuttle dispatch.
//!
//! This crate provides [`HeuristicDispatcher`], the default implementation of
//! the [`Dispatcher`](shuttle_core::Dispatcher) trait. It assigns guests to
//! vehicles with a two-phase greedy planner that never leaves a guest behind,
//! orders each vehicle's pickups with a heuristic chosen from the dominant
//! zone of its cluster, reconciles pickup times against preferred windows, and
//! scores the outcome with [`shuttle_scorer::EfficiencyScorer`].
//!
//! Everything is deterministic: ties are broken by identifier and routes are
//! collected in vehicle order even though vehicles are sequenced in parallel.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assignment;
mod comparison;
mod config;
mod dispatcher;
mod sequencing;

pub use assignment::{AssignmentPlan, VehicleAssignment, plan_assignments};
pub use comparison::{StrategyComparison, StrategySummary};
pub use config::{DispatcherConfig, DispatcherConfigError};
pub use dispatcher::HeuristicDispatcher;
pub use sequencing::{RouteSequencer, SequencedRoute, order_pickups};
