//! Great-circle measurements between validated WGS84 coordinates.
//!
//! [`LatLng`] is the only way coordinates enter the engine. Construction
//! rejects out-of-range or non-finite values with [`CoordinateError`], so the
//! measurement helpers below are infallible.

use geo::{Bearing, Centroid, Distance, Haversine, MultiPoint, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by [`LatLng::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude or longitude was outside the valid range or not finite.
    #[error("invalid coordinate (lat {lat}, lng {lng})")]
    InvalidCoordinate {
        /// Rejected latitude.
        lat: f64,
        /// Rejected longitude.
        lng: f64,
    },
}

/// A validated latitude/longitude pair in decimal degrees.
///
/// # Examples
/// ```
/// use shuttle_core::LatLng;
///
/// let port = LatLng::new(24.3336, 124.1543).expect("valid coordinate");
/// assert_eq!(port.lat(), 24.3336);
/// assert!(LatLng::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLatLng", into = "RawLatLng")]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Serialize, Deserialize)]
struct RawLatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Validate and construct a coordinate.
    ///
    /// # Errors
    /// Returns [`CoordinateError::InvalidCoordinate`] when latitude is outside
    /// `[-90, 90]`, longitude is outside `[-180, 180]`, or either is not
    /// finite.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Ok(Self { lat, lng })
        } else {
            Err(CoordinateError::InvalidCoordinate { lat, lng })
        }
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn lng(self) -> f64 {
        self.lng
    }

    /// Convert to a `geo` point (`x = lng`, `y = lat`).
    #[must_use]
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

impl TryFrom<RawLatLng> for LatLng {
    type Error = CoordinateError;

    fn try_from(raw: RawLatLng) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lng)
    }
}

impl From<LatLng> for RawLatLng {
    fn from(value: LatLng) -> Self {
        Self {
            lat: value.lat,
            lng: value.lng,
        }
    }
}

impl From<LatLng> for geo::Coord<f64> {
    fn from(value: LatLng) -> Self {
        geo::Coord {
            x: value.lng,
            y: value.lat,
        }
    }
}

/// Haversine distance between two coordinates in kilometres.
///
/// The result is symmetric, never negative and zero for identical inputs.
///
/// # Examples
/// ```
/// use shuttle_core::{LatLng, distance_km};
///
/// let a = LatLng::new(24.3336, 124.1543).expect("valid");
/// let b = LatLng::new(24.4167, 124.1556).expect("valid");
/// let d = distance_km(a, b);
/// assert!(d > 9.0 && d < 9.5);
/// assert_eq!(distance_km(a, a), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "metres to kilometres conversion"
)]
pub fn distance_km(a: LatLng, b: LatLng) -> f64 {
    if a == b {
        return 0.0;
    }
    let metres = Haversine.distance(a.to_point(), b.to_point());
    (metres / 1000.0).max(0.0)
}

/// Initial great-circle bearing from `origin` to `destination`.
///
/// Degrees clockwise from north, normalised into `[0, 360)`. Identical points
/// report a bearing of zero.
#[must_use]
pub fn bearing_deg(origin: LatLng, destination: LatLng) -> f64 {
    if origin == destination {
        return 0.0;
    }
    let raw = Haversine.bearing(origin.to_point(), destination.to_point());
    if raw.is_finite() {
        raw.rem_euclid(360.0)
    } else {
        0.0
    }
}

/// Planar centroid of a set of coordinates, `None` when the slice is empty.
#[must_use]
pub fn centroid(coords: &[LatLng]) -> Option<LatLng> {
    let points: MultiPoint<f64> = coords.iter().map(|c| c.to_point()).collect();
    let centre = points.centroid()?;
    LatLng::new(centre.y(), centre.x()).ok()
}
