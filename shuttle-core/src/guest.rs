//! Pickup requests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::TimeWindow;
use crate::geo_metrics::LatLng;

/// Errors returned by [`Guest::new`] and [`Guest::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuestError {
    /// The identifier was blank.
    #[error("guest identifier must not be empty")]
    EmptyId,
    /// Party size was zero.
    #[error("guest '{id}' must have a party size of at least one")]
    ZeroPartySize {
        /// Offending guest.
        id: String,
    },
}

/// A party waiting to be collected.
///
/// # Examples
/// ```
/// use shuttle_core::{ClockTime, Guest, LatLng, TimeWindow};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let window = TimeWindow::new("08:30".parse()?, "09:00".parse()?)?;
/// let guest = Guest::new("g1", "Tanaka", LatLng::new(24.3336, 124.1543)?, 2, window)?
///     .with_hotel("ANA InterContinental");
/// assert_eq!(guest.party_size, 2);
/// assert!(Guest::new("g2", "Empty", LatLng::new(24.3, 124.1)?, 0, window).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    /// Unique identifier; ties in planning are broken by it.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Pickup coordinate.
    pub pickup: LatLng,
    /// Number of seats required.
    pub party_size: u32,
    /// Preferred pickup window.
    pub window: TimeWindow,
    /// Hotel or landmark for the driver sheet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<String>,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Guest {
    /// Validate and construct a guest without optional metadata.
    ///
    /// # Errors
    /// Returns [`GuestError`] when the id is blank or the party is empty.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        pickup: LatLng,
        party_size: u32,
        window: TimeWindow,
    ) -> Result<Self, GuestError> {
        let guest = Self {
            id: id.into(),
            name: name.into(),
            pickup,
            party_size,
            window,
            hotel: None,
            notes: None,
        };
        guest.validate()?;
        Ok(guest)
    }

    /// Attach a hotel name.
    #[must_use]
    pub fn with_hotel(mut self, hotel: impl Into<String>) -> Self {
        self.hotel = Some(hotel.into());
        self
    }

    /// Attach driver notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Check invariants that deserialisation cannot enforce.
    ///
    /// # Errors
    /// Returns [`GuestError`] when the id is blank or the party is empty.
    pub fn validate(&self) -> Result<(), GuestError> {
        if self.id.trim().is_empty() {
            return Err(GuestError::EmptyId);
        }
        if self.party_size == 0 {
            return Err(GuestError::ZeroPartySize {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}
