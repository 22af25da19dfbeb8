//! Coarse area classification of pickup coordinates.
//!
//! A [`ZoneMap`] holds named bounding regions checked in priority order. The
//! default map covers the Ishigaki island service area: the port-side city
//! centre, the Kabira bay and Yonehara coast, the northern peninsula and the
//! Shiraho east coast. Anything outside a region is [`Zone::Generic`].

use std::collections::BTreeMap;

use geo::{Coord, Intersects, Rect};
use serde::{Deserialize, Serialize};

use crate::geo_metrics::{LatLng, centroid};

/// Coarse geographic classification driving base speed and sequencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Congested town centre with frequent signals and one-way streets.
    DenseUrban,
    /// Resort and beach areas with seasonal traffic.
    TouristHotspot,
    /// Sparse road network outside settlements.
    Rural,
    /// Anything not covered by a named region.
    Generic,
}

impl Zone {
    /// All zones in their fixed tie-break order.
    pub const ALL: [Self; 4] = [
        Self::DenseUrban,
        Self::TouristHotspot,
        Self::Rural,
        Self::Generic,
    ];

    /// Return the zone as a `snake_case` label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DenseUrban => "dense_urban",
            Self::TouristHotspot => "tourist_hotspot",
            Self::Rural => "rural",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named bounding region mapped to a zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneRegion {
    /// Human-readable area name.
    pub name: String,
    /// Zone reported for coordinates inside the region.
    pub zone: Zone,
    /// Bounds with `x = lng` and `y = lat`; edges count as inside.
    pub bounds: Rect<f64>,
}

impl ZoneRegion {
    /// Build a region from latitude and longitude ranges.
    #[must_use]
    pub fn new(name: &str, zone: Zone, lat: (f64, f64), lng: (f64, f64)) -> Self {
        Self {
            name: name.to_owned(),
            zone,
            bounds: Rect::new(Coord { x: lng.0, y: lat.0 }, Coord { x: lng.1, y: lat.1 }),
        }
    }

    fn contains(&self, coord: LatLng) -> bool {
        self.bounds.intersects(&Coord::from(coord))
    }
}

/// Ordered set of regions used by [`ZoneMap::classify`].
///
/// # Examples
/// ```
/// use shuttle_core::{LatLng, Zone, ZoneMap};
///
/// let map = ZoneMap::default();
/// let port = LatLng::new(24.3336, 124.1543).expect("valid");
/// assert_eq!(map.classify(port), Zone::DenseUrban);
/// let open_sea = LatLng::new(10.0, 10.0).expect("valid");
/// assert_eq!(map.classify(open_sea), Zone::Generic);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneMap {
    regions: Vec<ZoneRegion>,
}

impl ZoneMap {
    /// Construct a map from regions checked in the given order.
    #[must_use]
    pub const fn new(regions: Vec<ZoneRegion>) -> Self {
        Self { regions }
    }

    /// The Ishigaki island service area.
    #[must_use]
    pub fn ishigaki() -> Self {
        Self::new(vec![
            ZoneRegion::new(
                "city centre",
                Zone::DenseUrban,
                (24.325, 24.350),
                (124.140, 124.175),
            ),
            ZoneRegion::new(
                "kabira and yonehara",
                Zone::TouristHotspot,
                (24.400, 24.480),
                (124.000, 124.160),
            ),
            ZoneRegion::new(
                "northern peninsula",
                Zone::Rural,
                (24.480, 24.620),
                (124.200, 124.350),
            ),
            ZoneRegion::new("shiraho", Zone::Rural, (24.290, 24.330), (124.180, 124.220)),
        ])
    }

    /// Regions in priority order.
    #[must_use]
    pub fn regions(&self) -> &[ZoneRegion] {
        &self.regions
    }

    /// Classify a coordinate by the first region containing it.
    #[must_use]
    pub fn classify(&self, coord: LatLng) -> Zone {
        self.regions
            .iter()
            .find(|region| region.contains(coord))
            .map_or(Zone::Generic, |region| region.zone)
    }

    /// Most frequent zone across a cluster of coordinates.
    ///
    /// Ties are broken by the zone of the cluster centroid when it is among
    /// the tied zones, then by [`Zone::ALL`] order. An empty cluster is
    /// [`Zone::Generic`].
    #[must_use]
    pub fn dominant_zone(&self, coords: &[LatLng]) -> Zone {
        let mut counts: BTreeMap<Zone, usize> = BTreeMap::new();
        for coord in coords {
            *counts.entry(self.classify(*coord)).or_default() += 1;
        }
        let Some(best) = counts.values().copied().max() else {
            return Zone::Generic;
        };
        let tied: Vec<Zone> = Zone::ALL
            .into_iter()
            .filter(|zone| counts.get(zone) == Some(&best))
            .collect();
        let centre_zone = centroid(coords).map(|centre| self.classify(centre));
        match centre_zone {
            Some(zone) if tied.contains(&zone) => zone,
            _ => tied.first().copied().unwrap_or(Zone::Generic),
        }
    }
}

impl Default for ZoneMap {
    fn default() -> Self {
        Self::ishigaki()
    }
}
