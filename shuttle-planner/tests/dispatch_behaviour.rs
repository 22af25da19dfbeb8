//! Behavioural coverage for end-to-end dispatch scenarios.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use shuttle_core::test_support::{
    KABIRA_BAY, activity, guest, guest_with_window, ishigaki_morning_tour, vehicle,
};
use shuttle_core::{
    ActivityLocation, Compliance, Dispatcher, Guest, OptimizationResult, OptimizeRequest, Vehicle,
    Visibility, VehicleRoute, WeatherSnapshot,
};
use shuttle_planner::HeuristicDispatcher;

const DEPOT: (f64, f64) = (24.200, 124.300);

#[derive(Default)]
struct World {
    guests: Vec<Guest>,
    vehicles: Vec<Vehicle>,
    activity: Option<ActivityLocation>,
    tour: Option<OptimizeRequest>,
    result: Option<OptimizationResult>,
    rough: Option<OptimizationResult>,
}

#[fixture]
fn world() -> RefCell<World> {
    RefCell::new(World::default())
}

fn result(world: &RefCell<World>) -> OptimizationResult {
    world
        .borrow()
        .result
        .clone()
        .unwrap_or_else(|| panic!("pickups must be dispatched first"))
}

fn route(world: &RefCell<World>, vehicle_id: &str) -> VehicleRoute {
    result(world)
        .route(vehicle_id.trim_matches('"'))
        .cloned()
        .unwrap_or_else(|| panic!("no route for {vehicle_id}"))
}

#[given("a van with {seats} seats at the depot")]
fn van_at_depot(seats: u32, #[from(world)] world: &RefCell<World>) {
    world.borrow_mut().vehicles.push(vehicle("v1", seats, DEPOT));
}

#[given("a party of {party} two kilometres from the depot wanting 08:30 to 09:00")]
fn party_nearby(party: u32, #[from(world)] world: &RefCell<World>) {
    world
        .borrow_mut()
        .guests
        .push(guest_with_window("g1", party, (24.218, 124.300), "08:30", "09:00"));
}

#[given("two parties of {party} near the depot")]
fn two_parties(party: u32, #[from(world)] world: &RefCell<World>) {
    let mut state = world.borrow_mut();
    state.guests.push(guest("g1", party, (24.218, 124.300)));
    state.guests.push(guest("g2", party, (24.220, 124.302)));
}

#[given("the activity three kilometres beyond the guest at 09:30")]
fn activity_beyond(#[from(world)] world: &RefCell<World>) {
    world.borrow_mut().activity = Some(activity((24.245, 124.300), "09:30"));
}

#[given("vans at the port and at Kabira")]
fn two_vans(#[from(world)] world: &RefCell<World>) {
    let mut state = world.borrow_mut();
    state.vehicles.push(vehicle("north", 4, (24.4500, 124.0200)));
    state.vehicles.push(vehicle("port", 4, (24.3340, 124.1560)));
}

#[given("two guests near the port and two near Kabira")]
fn clustered_guests(#[from(world)] world: &RefCell<World>) {
    let mut state = world.borrow_mut();
    state.guests.push(guest("port-1", 2, (24.3362, 124.1641)));
    state.guests.push(guest("port-2", 2, (24.3398, 124.1534)));
    state.guests.push(guest("kabira-1", 2, (24.4567, 124.0123)));
    state.guests.push(guest("kabira-2", 2, (24.4234, 124.0789)));
}

#[given("the activity at Kabira Bay at 10:30")]
fn activity_at_kabira(#[from(world)] world: &RefCell<World>) {
    world.borrow_mut().activity = Some(activity(KABIRA_BAY, "10:30"));
}

#[given("the Ishigaki morning tour")]
fn morning_tour(#[from(world)] world: &RefCell<World>) {
    world.borrow_mut().tour = Some(ishigaki_morning_tour(None));
}

#[when("the pickups are dispatched")]
fn dispatch(#[from(world)] world: &RefCell<World>) {
    let request = {
        let state = world.borrow();
        let destination = state
            .activity
            .clone()
            .unwrap_or_else(|| panic!("an activity must be given"));
        OptimizeRequest::new(
            state.guests.clone(),
            state.vehicles.clone(),
            destination,
            Some(WeatherSnapshot::calm()),
        )
    };
    let outcome = HeuristicDispatcher::default()
        .optimize(&request)
        .unwrap_or_else(|err| panic!("dispatch failed: {err}"));
    world.borrow_mut().result = Some(outcome);
}

#[when("the pickups are dispatched in calm and in rough weather")]
fn dispatch_twice(#[from(world)] world: &RefCell<World>) {
    let tour = world
        .borrow()
        .tour
        .clone()
        .unwrap_or_else(|| panic!("a tour must be given"));
    let dispatcher = HeuristicDispatcher::default();
    let calm = OptimizeRequest {
        weather: Some(WeatherSnapshot::new(10.0, 0.5, Visibility::Good, 26.0)),
        ..tour.clone()
    };
    let rough = OptimizeRequest {
        weather: Some(WeatherSnapshot::new(30.0, 2.0, Visibility::Good, 26.0)),
        ..tour
    };
    let calm_result = dispatcher
        .optimize(&calm)
        .unwrap_or_else(|err| panic!("calm dispatch failed: {err}"));
    let rough_result = dispatcher
        .optimize(&rough)
        .unwrap_or_else(|err| panic!("rough dispatch failed: {err}"));
    let mut state = world.borrow_mut();
    state.result = Some(calm_result);
    state.rough = Some(rough_result);
}

#[then("there is {count} route")]
fn route_count(count: usize, #[from(world)] world: &RefCell<World>) {
    assert_eq!(result(world).routes.len(), count);
}

#[then("the route for {vehicle_id} has {count} stops")]
fn stop_count(vehicle_id: String, count: usize, #[from(world)] world: &RefCell<World>) {
    assert_eq!(route(world, &vehicle_id).stops.len(), count);
}

#[then("guest {guest_id} is collected on time")]
fn collected_on_time(guest_id: String, #[from(world)] world: &RefCell<World>) {
    let wanted = guest_id.trim_matches('"');
    let outcome = result(world);
    let stop = outcome
        .routes
        .iter()
        .flat_map(|route| route.stops.iter())
        .find(|stop| stop.guest_id() == Some(wanted))
        .unwrap_or_else(|| panic!("guest {wanted} was not collected"));
    assert_eq!(stop.compliance, Compliance::OnTime);
}

#[then("the route for {vehicle_id} is {percent} percent full")]
fn utilisation(vehicle_id: String, percent: u32, #[from(world)] world: &RefCell<World>) {
    let actual = route(world, &vehicle_id).efficiency.capacity_utilisation;
    let expected = f64::from(percent) / 100.0;
    assert!((actual - expected).abs() < 1e-9, "utilisation {actual}");
}

#[then("the route for {vehicle_id} carries {count} guests")]
fn carries(vehicle_id: String, count: usize, #[from(world)] world: &RefCell<World>) {
    assert_eq!(route(world, &vehicle_id).guest_ids().len(), count);
}

#[then("the route for {vehicle_id} is over capacity by {overflow}")]
fn over_capacity(vehicle_id: String, overflow: u32, #[from(world)] world: &RefCell<World>) {
    assert_eq!(route(world, &vehicle_id).overflow, overflow);
}

#[then("every guest is served")]
fn all_served(#[from(world)] world: &RefCell<World>) {
    let expected = world.borrow().guests.len();
    assert_eq!(result(world).guests_served(), expected);
}

#[then("the route for {vehicle_id} only collects port guests")]
fn port_guests(vehicle_id: String, #[from(world)] world: &RefCell<World>) {
    let r = route(world, &vehicle_id);
    assert!(r.guest_ids().iter().all(|id| id.starts_with("port-")), "{:?}", r.guest_ids());
}

#[then("the route for {vehicle_id} only collects Kabira guests")]
fn kabira_guests(vehicle_id: String, #[from(world)] world: &RefCell<World>) {
    let r = route(world, &vehicle_id);
    assert!(r.guest_ids().iter().all(|id| id.starts_with("kabira-")), "{:?}", r.guest_ids());
}

fn both_plans(world: &RefCell<World>) -> (OptimizationResult, OptimizationResult) {
    let state = world.borrow();
    match (&state.result, &state.rough) {
        (Some(calm), Some(rough)) => (calm.clone(), rough.clone()),
        _ => panic!("both plans must be dispatched"),
    }
}

#[then("both plans use the same vans for the same guests")]
fn same_vans(#[from(world)] world: &RefCell<World>) {
    let (calm, rough) = both_plans(world);
    assert_eq!(calm.routes.len(), rough.routes.len());
    for calm_route in &calm.routes {
        let rough_route = rough
            .route(&calm_route.vehicle_id)
            .unwrap_or_else(|| panic!("no rough route for {}", calm_route.vehicle_id));
        assert_eq!(calm_route.guest_ids(), rough_route.guest_ids());
        assert_eq!(calm_route.strategy, rough_route.strategy);
    }
}

#[then("every rough route takes at least as long as its calm counterpart")]
fn each_route_is_slower(#[from(world)] world: &RefCell<World>) {
    let (calm, rough) = both_plans(world);
    for calm_route in &calm.routes {
        let rough_route = rough
            .route(&calm_route.vehicle_id)
            .unwrap_or_else(|| panic!("no rough route for {}", calm_route.vehicle_id));
        assert!(
            rough_route.total_duration_minutes >= calm_route.total_duration_minutes,
            "{}: rough {} < calm {}",
            calm_route.vehicle_id,
            rough_route.total_duration_minutes,
            calm_route.total_duration_minutes
        );
        assert!((rough_route.total_distance_km - calm_route.total_distance_km).abs() < 1e-9);
    }
}

#[then("the rough plan takes at least as long as the calm plan")]
fn rough_is_slower(#[from(world)] world: &RefCell<World>) {
    let (calm, rough) = both_plans(world);
    assert!(
        rough.total_duration_minutes >= calm.total_duration_minutes,
        "rough {} < calm {}",
        rough.total_duration_minutes,
        calm.total_duration_minutes
    );
}

#[scenario(path = "tests/features/dispatch.feature", index = 0)]
fn single_guest(world: RefCell<World>) {
    let _ = world;
}

#[scenario(path = "tests/features/dispatch.feature", index = 1)]
fn oversized_parties(world: RefCell<World>) {
    let _ = world;
}

#[scenario(path = "tests/features/dispatch.feature", index = 2)]
fn separate_clusters(world: RefCell<World>) {
    let _ = world;
}

#[scenario(path = "tests/features/dispatch.feature", index = 3)]
fn rough_weather(world: RefCell<World>) {
    let _ = world;
}
