//! Wall-clock times and preferred pickup windows.
//!
//! Times are whole minutes since midnight and serialise as `HH:MM`. Values
//! past midnight are kept as-is so route schedules stay monotonic; they wrap
//! only when formatted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MINUTES_PER_HOUR: u32 = 60;
const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;

/// Errors raised when parsing or constructing clock times and windows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockTimeError {
    /// The text was not in `HH:MM` form.
    #[error("expected HH:MM, found '{0}'")]
    Malformed(String),
    /// Hour or minute fields were out of range.
    #[error("time {hour:02}:{minute:02} is out of range")]
    OutOfRange {
        /// Parsed hour field.
        hour: u32,
        /// Parsed minute field.
        minute: u32,
    },
    /// A window ended before it started.
    #[error("window end {end} is before start {start}")]
    InvertedWindow {
        /// Window start.
        start: ClockTime,
        /// Window end.
        end: ClockTime,
    },
}

/// Minutes since midnight.
///
/// # Examples
/// ```
/// use shuttle_core::ClockTime;
///
/// let t: ClockTime = "08:30".parse().expect("valid time");
/// assert_eq!(t.minutes(), 510);
/// assert_eq!(t.to_string(), "08:30");
/// assert_eq!(t.add_minutes(45).to_string(), "09:15");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u32);

impl ClockTime {
    /// Midnight.
    pub const MIDNIGHT: Self = Self(0);

    /// Construct from hour and minute fields.
    ///
    /// # Errors
    /// Returns [`ClockTimeError::OutOfRange`] for hours above 23 or minutes
    /// above 59.
    pub const fn from_hm(hour: u32, minute: u32) -> Result<Self, ClockTimeError> {
        if hour >= 24 || minute >= MINUTES_PER_HOUR {
            return Err(ClockTimeError::OutOfRange { hour, minute });
        }
        Ok(Self(hour * MINUTES_PER_HOUR + minute))
    }

    /// Construct from raw minutes since midnight.
    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    /// Minutes since midnight.
    #[must_use]
    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Shift forward by whole minutes, saturating at `u32::MAX`.
    #[must_use]
    pub const fn add_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes))
    }

    /// Shift backward by whole minutes, saturating at midnight.
    #[must_use]
    pub const fn sub_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_sub(minutes))
    }

    /// Signed difference `self - other` in minutes.
    #[must_use]
    pub fn minutes_since(self, other: Self) -> i64 {
        i64::from(self.0) - i64::from(other.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let of_day = self.0 % MINUTES_PER_DAY;
        write!(
            f,
            "{:02}:{:02}",
            of_day / MINUTES_PER_HOUR,
            of_day % MINUTES_PER_HOUR
        )
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ClockTimeError::Malformed(s.to_owned());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(malformed)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(malformed());
        }
        let hour: u32 = hour.parse().map_err(|_| malformed())?;
        let minute: u32 = minute.parse().map_err(|_| malformed())?;
        Self::from_hm(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ClockTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

/// Preferred pickup window, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow", into = "RawWindow")]
pub struct TimeWindow {
    start: ClockTime,
    end: ClockTime,
}

#[derive(Serialize, Deserialize)]
struct RawWindow {
    start: ClockTime,
    end: ClockTime,
}

impl TimeWindow {
    /// Validate and construct a window.
    ///
    /// # Errors
    /// Returns [`ClockTimeError::InvertedWindow`] when `end < start`.
    pub fn new(start: ClockTime, end: ClockTime) -> Result<Self, ClockTimeError> {
        if end < start {
            return Err(ClockTimeError::InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window start.
    #[must_use]
    pub const fn start(self) -> ClockTime {
        self.start
    }

    /// Window end.
    #[must_use]
    pub const fn end(self) -> ClockTime {
        self.end
    }

    /// Signed minutes outside the window: negative when early, positive when
    /// late, zero inside.
    #[must_use]
    pub fn deviation(self, time: ClockTime) -> i64 {
        if time < self.start {
            time.minutes_since(self.start)
        } else if time > self.end {
            time.minutes_since(self.end)
        } else {
            0
        }
    }
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = ClockTimeError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl From<TimeWindow> for RawWindow {
    fn from(value: TimeWindow) -> Self {
        Self {
            start: value.start,
            end: value.end,
        }
    }
}
