//! Core domain types for the shuttle dispatch engine.
//!
//! Inputs are validated value objects: constructors and deserialisers return
//! `Result` so malformed coordinates, empty parties or inverted windows are
//! rejected before planning starts. The crate also defines the seams that
//! planners and services implement: [`Dispatcher`], [`TravelTimeEstimator`]
//! and [`DelayAdvisor`].

#![forbid(unsafe_code)]

pub mod clock;
pub mod dispatcher;
pub mod geo_metrics;
pub mod guest;
pub mod request;
pub mod result;
pub mod route;
pub mod travel_time;
pub mod vehicle;
pub mod weather;
pub mod zone;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{ClockTime, ClockTimeError, TimeWindow};
pub use dispatcher::{DelayAdvisor, Dispatcher, OptimizeError};
pub use geo_metrics::{CoordinateError, LatLng, bearing_deg, centroid, distance_km};
pub use guest::{Guest, GuestError};
pub use request::OptimizeRequest;
pub use result::{Diagnostics, DispatchWarning, OptimizationResult};
pub use route::{
    Compliance, RouteEfficiency, RouteStop, SequencingStrategy, StopKind, VehicleRoute,
};
pub use travel_time::{
    TravelTimeEstimator, ZoneSpeedConfig, ZoneSpeedConfigError, ZoneSpeedEstimator,
};
pub use vehicle::{ActivityLocation, Vehicle, VehicleError};
pub use weather::{
    ImpactLevel, Visibility, WeatherImpact, WeatherRecommendation, WeatherSnapshot, evaluate,
};
pub use zone::{Zone, ZoneMap, ZoneRegion};
