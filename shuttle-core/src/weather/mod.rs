//! Translate a weather snapshot into travel and comfort effects.
//!
//! The caller resolves weather from whatever provider it uses and hands the
//! engine a [`WeatherSnapshot`]. [`evaluate`] maps it to a [`WeatherImpact`]
//! through fixed threshold bands. Weather is advisory: incomplete or
//! malformed snapshots never fail, they degrade to [`WeatherImpact::neutral`].

mod impact;
mod snapshot;

pub use impact::{ImpactLevel, WeatherImpact, WeatherRecommendation, evaluate};
pub use snapshot::{Visibility, WeatherSnapshot};
