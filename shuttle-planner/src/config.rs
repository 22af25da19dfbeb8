//! Tunables for [`crate::HeuristicDispatcher`].

use serde::{Deserialize, Serialize};
use shuttle_core::SequencingStrategy;
use thiserror::Error;

/// Errors from [`DispatcherConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatcherConfigError {
    /// Boarding must take at least a minute so stop times strictly increase.
    #[error("boarding time must be at least one minute")]
    ZeroBoardingTime,
}

/// Scheduling parameters.
///
/// # Examples
/// ```
/// use shuttle_planner::DispatcherConfig;
///
/// let config = DispatcherConfig::default();
/// assert_eq!(config.boarding_minutes, 5);
/// assert_eq!(config.window_tolerance_minutes, 30);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Minutes spent loading each party.
    pub boarding_minutes: u32,
    /// Deviations up to this many minutes are reported but not corrected.
    pub window_tolerance_minutes: u32,
    /// Minutes before the activity start a vehicle should arrive.
    pub arrival_buffer_minutes: u32,
    /// Force one sequencing heuristic for every vehicle.
    pub strategy_override: Option<SequencingStrategy>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            boarding_minutes: 5,
            window_tolerance_minutes: 30,
            arrival_buffer_minutes: 10,
            strategy_override: None,
        }
    }
}

impl DispatcherConfig {
    /// Validate the configuration and return a copy.
    ///
    /// # Errors
    /// Returns [`DispatcherConfigError::ZeroBoardingTime`] when boarding takes
    /// no time.
    pub const fn validate(self) -> Result<Self, DispatcherConfigError> {
        if self.boarding_minutes == 0 {
            return Err(DispatcherConfigError::ZeroBoardingTime);
        }
        Ok(self)
    }

    /// Copy with a forced strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Option<SequencingStrategy>) -> Self {
        self.strategy_override = strategy;
        self
    }
}
