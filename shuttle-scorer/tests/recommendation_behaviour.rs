//! Behavioural coverage for scoring plans and deriving operator advice.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use shuttle_core::test_support::{at, time, vehicle};
use shuttle_core::{
    Compliance, DispatchWarning, RouteEfficiency, RouteStop, SequencingStrategy, StopKind,
    Vehicle, VehicleRoute, WeatherSnapshot, Zone, evaluate,
};
use shuttle_scorer::{EfficiencyScorer, FleetContext, RecommendationInput};

#[derive(Debug, Default)]
struct Plan {
    route: Option<VehicleRoute>,
    fleet: Vec<Vehicle>,
    warnings: Vec<DispatchWarning>,
    score: Option<f64>,
    advice: Vec<String>,
}

impl Plan {
    fn route_mut(&mut self) -> &mut VehicleRoute {
        self.route
            .as_mut()
            .unwrap_or_else(|| panic!("a van must be described first"))
    }
}

#[fixture]
fn plan() -> RefCell<Plan> {
    RefCell::new(Plan::default())
}

fn pickup(index: u32, party_size: u32) -> RouteStop {
    RouteStop {
        kind: StopKind::Pickup {
            guest_id: format!("g{index}"),
            guest_name: format!("Guest {index}"),
            party_size,
            hotel: None,
            notes: None,
        },
        location: at(24.34, 124.15),
        time: time("08:30").add_minutes(index * 10),
        distance_from_previous_km: 2.0,
        travel_minutes: 6.0,
        compliance: Compliance::OnTime,
        deviation_minutes: 0,
        nudged: false,
        advisory_delay_minutes: None,
    }
}

fn van_route(capacity: u32, passengers: u32, distance_km: f64) -> VehicleRoute {
    let stops: Vec<RouteStop> = (0..passengers.div_ceil(2))
        .map(|index| pickup(index, 2_u32.min(passengers - index * 2)))
        .chain(std::iter::once(RouteStop {
            kind: StopKind::Activity { name: None },
            location: at(24.4167, 124.1556),
            time: time("09:40"),
            distance_from_previous_km: 4.0,
            travel_minutes: 12.0,
            compliance: Compliance::OnTime,
            deviation_minutes: 0,
            nudged: false,
            advisory_delay_minutes: None,
        }))
        .collect();
    VehicleRoute {
        vehicle_id: "van".to_owned(),
        vehicle_name: "Van".to_owned(),
        driver: "Driver".to_owned(),
        departure: time("08:20"),
        stops,
        total_distance_km: distance_km,
        total_duration_minutes: 80.0,
        idle_minutes: 0.0,
        passenger_count: passengers,
        capacity,
        overflow: passengers.saturating_sub(capacity),
        zone: Zone::Generic,
        strategy: SequencingStrategy::NearestNeighbour,
        efficiency: RouteEfficiency::default(),
    }
}

#[given("a van with {seats} seats carrying {passengers} guests over {distance} km")]
fn van(seats: u32, passengers: u32, distance: f64, #[from(plan)] plan: &RefCell<Plan>) {
    let mut plan = plan.borrow_mut();
    plan.route = Some(van_route(seats, passengers, distance));
    plan.fleet.push(vehicle("van", seats, (24.334, 124.156)));
}

#[given("every pickup is on time")]
fn punctual(#[from(plan)] plan: &RefCell<Plan>) {
    let mut plan = plan.borrow_mut();
    let route = plan.route_mut();
    assert!(route.pickups().all(|stop| stop.compliance == Compliance::OnTime));
}

#[given("one pickup is late")]
fn one_late(#[from(plan)] plan: &RefCell<Plan>) {
    let mut plan = plan.borrow_mut();
    let stop = plan
        .route_mut()
        .stops
        .first_mut()
        .unwrap_or_else(|| panic!("the van has no stops"));
    stop.compliance = Compliance::Late;
    stop.deviation_minutes = 40;
}

#[given("a spare van stays at the depot")]
fn spare_van(#[from(plan)] plan: &RefCell<Plan>) {
    plan.borrow_mut()
        .fleet
        .push(vehicle("spare", 8, (24.334, 124.156)));
}

#[given("the van is over capacity")]
fn over_capacity(#[from(plan)] plan: &RefCell<Plan>) {
    let mut plan = plan.borrow_mut();
    let overflow = plan.route_mut().overflow;
    plan.warnings.push(DispatchWarning::CapacityOverflow {
        vehicle_id: "van".to_owned(),
        overflow,
    });
}

#[when("the plan is scored")]
fn score(#[from(plan)] plan: &RefCell<Plan>) {
    let scorer = EfficiencyScorer::default();
    let mut plan = plan.borrow_mut();
    let mut route = plan.route_mut().clone();
    route.efficiency = scorer.score_route(&route);
    let routes = vec![route];
    let fleet = FleetContext {
        vehicles: &plan.fleet,
        requested_seats: routes
            .iter()
            .map(|route| u64::from(route.passenger_count))
            .sum(),
    };
    let overall = scorer.score_fleet(&routes, fleet);
    let weather = evaluate(&WeatherSnapshot::calm());
    let advice = scorer.recommend(&RecommendationInput {
        routes: &routes,
        fleet,
        overall_efficiency: overall,
        weather: &weather,
        warnings: &plan.warnings,
    });
    plan.score = Some(overall);
    plan.advice = advice;
}

fn scored(plan: &RefCell<Plan>) -> f64 {
    plan.borrow()
        .score
        .unwrap_or_else(|| panic!("the plan must be scored first"))
}

#[then("the fleet scores 100")]
#[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
fn perfect(#[from(plan)] plan: &RefCell<Plan>) {
    let score = scored(plan);
    assert!((score - 100.0).abs() < 1e-9, "score {score}");
}

#[then("the fleet scores below {limit}")]
fn below(limit: f64, #[from(plan)] plan: &RefCell<Plan>) {
    let score = scored(plan);
    assert!(score < limit, "score {score}");
}

#[then("the only advice confirms the plan")]
fn confirmed(#[from(plan)] plan: &RefCell<Plan>) {
    assert_eq!(
        plan.borrow().advice,
        vec!["efficient plan: no changes needed".to_owned()]
    );
}

#[then("the advice mentions {text}")]
fn mentions(text: String, #[from(plan)] plan: &RefCell<Plan>) {
    let needle = text.trim_matches('"');
    let plan = plan.borrow();
    assert!(
        plan.advice.iter().any(|line| line.contains(needle)),
        "no advice mentions {needle:?}: {:?}",
        plan.advice
    );
}

#[scenario(path = "tests/features/recommendations.feature", index = 0)]
fn full_punctual_van(plan: RefCell<Plan>) {
    let _ = plan;
}

#[scenario(path = "tests/features/recommendations.feature", index = 1)]
fn sparse_late_van(plan: RefCell<Plan>) {
    let _ = plan;
}

#[scenario(path = "tests/features/recommendations.feature", index = 2)]
fn overloaded_van(plan: RefCell<Plan>) {
    let _ = plan;
}
