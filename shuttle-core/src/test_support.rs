//! Builders and deterministic collaborators for unit and behaviour tests.
//!
//! Builders panic on invalid input: they exist to keep fixtures short, and a
//! bad fixture is a test bug.
#![expect(
    clippy::expect_used,
    reason = "test builders fail loudly on invalid fixtures"
)]

use crate::{
    ActivityLocation, ClockTime, DelayAdvisor, Guest, LatLng, OptimizeRequest, TimeWindow,
    TravelTimeEstimator, Vehicle, WeatherImpact, WeatherSnapshot, Zone, distance_km,
};

/// Validated coordinate from degrees.
#[must_use]
pub fn at(lat: f64, lng: f64) -> LatLng {
    LatLng::new(lat, lng).expect("fixture coordinate should be valid")
}

/// Clock time from `HH:MM`.
#[must_use]
pub fn time(text: &str) -> ClockTime {
    text.parse().expect("fixture time should be HH:MM")
}

/// Guest with an 08:30-09:00 window.
#[must_use]
pub fn guest(id: &str, party_size: u32, coords: (f64, f64)) -> Guest {
    guest_with_window(id, party_size, coords, "08:30", "09:00")
}

/// Guest with an explicit window.
#[must_use]
pub fn guest_with_window(
    id: &str,
    party_size: u32,
    coords: (f64, f64),
    start: &str,
    end: &str,
) -> Guest {
    let window = TimeWindow::new(time(start), time(end)).expect("fixture window should be ordered");
    Guest::new(id, format!("Guest {id}"), at(coords.0, coords.1), party_size, window)
        .expect("fixture guest should be valid")
}

/// Vehicle named after its identifier.
#[must_use]
pub fn vehicle(id: &str, capacity: u32, coords: (f64, f64)) -> Vehicle {
    Vehicle::new(
        id,
        format!("Van {id}"),
        format!("Driver {id}"),
        capacity,
        at(coords.0, coords.1),
    )
    .expect("fixture vehicle should be valid")
}

/// Unnamed activity location.
#[must_use]
pub fn activity(coords: (f64, f64), start: &str) -> ActivityLocation {
    ActivityLocation::new(at(coords.0, coords.1), time(start))
}

/// Estimator charging one minute per kilometre times the delay factor, with
/// a one-minute floor for distinct points.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnitTravelTimeEstimator;

impl TravelTimeEstimator for UnitTravelTimeEstimator {
    #[expect(clippy::float_arithmetic, reason = "unit-rate travel time")]
    fn estimate_minutes(&self, from: LatLng, to: LatLng, _zone: Zone, impact: &WeatherImpact) -> f64 {
        let km = distance_km(from, to);
        if km <= 0.0 {
            return 0.0;
        }
        (km * impact.delay_factor.max(1.0)).max(1.0)
    }
}

/// Advisor predicting the same delay for every pickup.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelayAdvisor(pub f64);

impl DelayAdvisor for FixedDelayAdvisor {
    fn advise(
        &self,
        _vehicle: &Vehicle,
        _guest: &Guest,
        _scheduled: ClockTime,
        _impact: &WeatherImpact,
    ) -> Option<f64> {
        Some(self.0)
    }
}

/// Hotels around Ishigaki used by the fixture tour: name and coordinate.
pub const ISHIGAKI_HOTELS: [(&str, (f64, f64)); 10] = [
    ("ANA InterContinental", (24.3362, 124.1641)),
    ("Fusaki Beach Resort", (24.3264, 124.1275)),
    ("Grandvrio Resort", (24.3289, 124.1456)),
    ("Art Hotel", (24.3412, 124.1589)),
    ("Hotel Miyahira", (24.3398, 124.1534)),
    ("Vessel Hotel", (24.3387, 124.1523)),
    ("Kabira Bay Inn", (24.4567, 124.0123)),
    ("Shiraho Guesthouse", (24.3089, 124.1892)),
    ("Yonehara Beach Lodge", (24.4234, 124.0789)),
    ("Port Business Hotel", (24.3336, 124.1543)),
];

/// Kabira Bay, the fixture tour's meeting point.
pub const KABIRA_BAY: (f64, f64) = (24.4167, 124.1556);

/// Guest staying at the `index`-th hotel of [`ISHIGAKI_HOTELS`] (wrapping).
#[must_use]
pub fn hotel_guest(id: &str, party_size: u32, index: usize, start: &str, end: &str) -> Guest {
    let (hotel, coords) = ISHIGAKI_HOTELS
        .iter()
        .cycle()
        .nth(index)
        .copied()
        .expect("hotel list is not empty");
    guest_with_window(id, party_size, coords, start, end).with_hotel(hotel)
}

/// A morning snorkelling tour: one guest per fixture hotel, three vans based
/// at the port, arriving at Kabira Bay for a 10:00 start.
#[must_use]
pub fn ishigaki_morning_tour(weather: Option<WeatherSnapshot>) -> OptimizeRequest {
    let party_sizes = [2, 4, 2, 3, 1, 2, 2, 3, 4, 1];
    let guests = party_sizes
        .into_iter()
        .enumerate()
        .map(|(index, party)| {
            let id = format!("g{:02}", index + 1);
            hotel_guest(&id, party, index, "08:30", "09:15")
        })
        .collect();
    let vehicles = vec![
        vehicle("van-1", 8, (24.3340, 124.1560)),
        vehicle("van-2", 8, (24.3340, 124.1560)),
        vehicle("van-3", 10, (24.3340, 124.1560)),
    ];
    OptimizeRequest::new(
        guests,
        vehicles,
        activity(KABIRA_BAY, "10:00").with_name("Kabira Bay snorkelling"),
        weather,
    )
}
