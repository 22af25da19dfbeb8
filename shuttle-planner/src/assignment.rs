//! Capacity-constrained assignment of guests to vehicles.
//!
//! Phase one walks guests largest party first and gives each to the feasible
//! vehicle whose last stop (or home) is nearest. Phase two force-places any
//! guest that fit nowhere on the vehicle left with the least overflow. Every
//! guest ends up on exactly one vehicle.

use std::collections::BTreeMap;

use shuttle_core::{Guest, LatLng, OptimizeError, Vehicle, distance_km};

/// Guests placed on one vehicle, in assignment order.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleAssignment<'a> {
    /// Assigned vehicle.
    pub vehicle: &'a Vehicle,
    /// Guests in the order they were assigned.
    pub guests: Vec<&'a Guest>,
    /// Seats taken.
    pub load: u32,
}

impl<'a> VehicleAssignment<'a> {
    /// Seats taken beyond capacity.
    #[must_use]
    pub const fn overflow(&self) -> u32 {
        self.load.saturating_sub(self.vehicle.capacity)
    }

    fn last_position(&self) -> LatLng {
        self.guests
            .last()
            .map_or(self.vehicle.home, |guest| guest.pickup)
    }

    fn push(&mut self, guest: &'a Guest) {
        self.load = self.load.saturating_add(guest.party_size);
        self.guests.push(guest);
    }
}

/// Result of assignment keyed by vehicle identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPlan<'a> {
    /// Every vehicle, including those left empty.
    pub assignments: BTreeMap<&'a str, VehicleAssignment<'a>>,
    /// Guests placed within capacity.
    pub phase_one: usize,
    /// Guests placed beyond capacity.
    pub forced: usize,
}

impl<'a> AssignmentPlan<'a> {
    /// Vehicles that received at least one guest, in identifier order.
    pub fn non_empty(&self) -> impl Iterator<Item = &VehicleAssignment<'a>> {
        self.assignments
            .values()
            .filter(|assignment| !assignment.guests.is_empty())
    }
}

/// Assign every guest to a vehicle.
///
/// Ties are broken deterministically: guests by party size descending then
/// identifier, vehicles by identifier. An empty guest list yields an empty
/// plan even without vehicles.
///
/// # Errors
/// Returns [`OptimizeError::NoVehiclesAvailable`] when guests exist but the
/// fleet is empty.
pub fn plan_assignments<'a>(
    guests: &'a [Guest],
    vehicles: &'a [Vehicle],
) -> Result<AssignmentPlan<'a>, OptimizeError> {
    if !guests.is_empty() && vehicles.is_empty() {
        return Err(OptimizeError::NoVehiclesAvailable {
            guests: guests.len(),
        });
    }
    let mut assignments: BTreeMap<&'a str, VehicleAssignment<'a>> = vehicles
        .iter()
        .map(|vehicle| {
            (
                vehicle.id.as_str(),
                VehicleAssignment {
                    vehicle,
                    guests: Vec::new(),
                    load: 0,
                },
            )
        })
        .collect();

    let mut ordered: Vec<&'a Guest> = guests.iter().collect();
    ordered.sort_by(|a, b| b.party_size.cmp(&a.party_size).then_with(|| a.id.cmp(&b.id)));

    let mut unplaced = Vec::new();
    let mut phase_one = 0;
    for guest in ordered {
        let best = assignments
            .values_mut()
            .filter(|slot| {
                slot.load.saturating_add(guest.party_size) <= slot.vehicle.capacity
            })
            .map(|slot| (distance_km(slot.last_position(), guest.pickup), slot))
            .reduce(|best, candidate| {
                // Iteration is in id order, so strict comparison keeps the lowest id.
                if candidate.0.total_cmp(&best.0).is_lt() {
                    candidate
                } else {
                    best
                }
            });
        match best {
            Some((_, slot)) => {
                slot.push(guest);
                phase_one += 1;
            }
            None => unplaced.push(guest),
        }
    }

    let forced = unplaced.len();
    for guest in unplaced {
        let slot = assignments.values_mut().min_by_key(|slot| {
            let load = slot.load.saturating_add(guest.party_size);
            (load.saturating_sub(slot.vehicle.capacity), load)
        });
        if let Some(slot) = slot {
            log::warn!(
                "guest {} (party {}) exceeds remaining capacity; forcing onto vehicle {}",
                guest.id,
                guest.party_size,
                slot.vehicle.id
            );
            slot.push(guest);
        }
    }

    log::debug!(
        "assigned {phase_one} guest(s) within capacity and {forced} by force across {} vehicle(s)",
        assignments.len()
    );
    Ok(AssignmentPlan {
        assignments,
        phase_one,
        forced,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use shuttle_core::test_support::{guest, vehicle};

    fn ids<'a>(plan: &'a AssignmentPlan<'_>, vehicle_id: &str) -> Vec<&'a str> {
        plan.assignments
            .get(vehicle_id)
            .map(|slot| slot.guests.iter().map(|g| g.id.as_str()).collect())
            .unwrap_or_default()
    }

    #[rstest]
    fn no_guests_is_an_empty_plan_even_without_vehicles() {
        let plan = plan_assignments(&[], &[]).expect("empty plan");
        assert!(plan.assignments.is_empty());
        assert_eq!((plan.phase_one, plan.forced), (0, 0));
    }

    #[rstest]
    fn guests_without_vehicles_fail() {
        let guests = [guest("g1", 2, (24.33, 124.15))];
        assert_eq!(
            plan_assignments(&guests, &[]),
            Err(OptimizeError::NoVehiclesAvailable { guests: 1 })
        );
    }

    #[rstest]
    fn guests_join_the_nearest_feasible_vehicle() {
        let guests = [
            guest("city", 2, (24.336, 124.156)),
            guest("kabira", 2, (24.452, 124.015)),
        ];
        let vehicles = [
            vehicle("north", 4, (24.455, 124.020)),
            vehicle("port", 4, (24.335, 124.155)),
        ];
        let plan = plan_assignments(&guests, &vehicles).expect("plan");
        assert_eq!(ids(&plan, "port"), vec!["city"]);
        assert_eq!(ids(&plan, "north"), vec!["kabira"]);
        assert_eq!(plan.forced, 0);
    }

    #[rstest]
    fn larger_parties_are_placed_first() {
        let guests = [
            guest("a-small", 1, (24.336, 124.156)),
            guest("b-large", 4, (24.336, 124.156)),
        ];
        let vehicles = [vehicle("v1", 4, (24.335, 124.155)), vehicle("v2", 4, (24.6, 124.3))];
        let plan = plan_assignments(&guests, &vehicles).expect("plan");
        assert_eq!(ids(&plan, "v1"), vec!["b-large"]);
        assert_eq!(ids(&plan, "v2"), vec!["a-small"]);
    }

    #[rstest]
    fn equal_distances_prefer_the_lowest_vehicle_id() {
        let guests = [guest("g1", 1, (24.34, 124.15))];
        let vehicles = [vehicle("v2", 4, (24.33, 124.15)), vehicle("v1", 4, (24.33, 124.15))];
        let plan = plan_assignments(&guests, &vehicles).expect("plan");
        assert_eq!(ids(&plan, "v1"), vec!["g1"]);
    }

    #[rstest]
    fn overflow_goes_to_the_least_overloaded_vehicle() {
        let guests = [
            guest("g1", 3, (24.34, 124.15)),
            guest("g2", 3, (24.34, 124.15)),
            guest("g3", 3, (24.34, 124.15)),
        ];
        let vehicles = [vehicle("v1", 4, (24.34, 124.15)), vehicle("v2", 5, (24.34, 124.15))];
        let plan = plan_assignments(&guests, &vehicles).expect("plan");
        // g1 -> v1, g2 -> v2; g3 overflows v2 by 1 rather than v1 by 2.
        assert_eq!(ids(&plan, "v1"), vec!["g1"]);
        assert_eq!(ids(&plan, "v2"), vec!["g2", "g3"]);
        assert_eq!(plan.forced, 1);
        let v2 = plan.assignments.get("v2").expect("v2 present");
        assert_eq!(v2.overflow(), 1);
    }

    #[rstest]
    fn oversized_party_still_gets_a_seat() {
        let guests = [guest("big", 7, (24.34, 124.15))];
        let vehicles = [vehicle("v1", 4, (24.34, 124.15))];
        let plan = plan_assignments(&guests, &vehicles).expect("plan");
        let v1 = plan.assignments.get("v1").expect("v1 present");
        assert_eq!(v1.load, 7);
        assert_eq!(v1.overflow(), 3);
        assert_eq!(plan.phase_one, 0);
        assert_eq!(plan.forced, 1);
    }
}
