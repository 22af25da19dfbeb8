//! Per-vehicle stop ordering and pickup-time reconciliation.
//!
//! A route leaves home so the first pickup lands on the first guest's window
//! start. Arrivals earlier than the window tolerance wait for the window to
//! open; pickups later than the tolerance pull the departure earlier as far
//! as the preceding stops allow. Whatever lateness remains is reported.

use shuttle_core::{
    ActivityLocation, ClockTime, Compliance, DelayAdvisor, DispatchWarning, Guest, LatLng,
    RouteEfficiency, RouteStop, SequencingStrategy, StopKind, TravelTimeEstimator, VehicleRoute,
    WeatherImpact, Zone, ZoneMap, bearing_deg, centroid, distance_km,
};

use crate::assignment::VehicleAssignment;
use crate::config::DispatcherConfig;

/// Order pickups with the given heuristic.
///
/// Every ordering is deterministic; remaining ties fall back to the guest
/// identifier.
#[must_use]
pub fn order_pickups<'a>(
    strategy: SequencingStrategy,
    home: LatLng,
    guests: &[&'a Guest],
) -> Vec<&'a Guest> {
    match strategy {
        SequencingStrategy::TimeWindow => by_window(guests),
        SequencingStrategy::NearestNeighbour => nearest_neighbour(home, guests),
        SequencingStrategy::AngularSweep => angular_sweep(home, guests),
    }
}

fn by_window<'a>(guests: &[&'a Guest]) -> Vec<&'a Guest> {
    let mut ordered = guests.to_vec();
    ordered.sort_by(|a, b| {
        a.window
            .start()
            .cmp(&b.window.start())
            .then_with(|| a.window.end().cmp(&b.window.end()))
            .then_with(|| a.id.cmp(&b.id))
    });
    ordered
}

fn nearest_neighbour<'a>(home: LatLng, guests: &[&'a Guest]) -> Vec<&'a Guest> {
    let mut remaining = guests.to_vec();
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut position = home;
    while let Some(next) = remaining
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            distance_km(position, a.pickup)
                .total_cmp(&distance_km(position, b.pickup))
                .then_with(|| a.id.cmp(&b.id))
        })
        .map(|(index, _)| index)
    {
        let guest = remaining.swap_remove(next);
        position = guest.pickup;
        ordered.push(guest);
    }
    ordered
}

#[expect(clippy::float_arithmetic, reason = "bearing offsets")]
fn angular_sweep<'a>(home: LatLng, guests: &[&'a Guest]) -> Vec<&'a Guest> {
    let pickups: Vec<LatLng> = guests.iter().map(|guest| guest.pickup).collect();
    let centre = centroid(&pickups).unwrap_or(home);
    let reference = bearing_deg(centre, home);
    let angle = |guest: &Guest| (bearing_deg(centre, guest.pickup) - reference).rem_euclid(360.0);
    let mut ordered = guests.to_vec();
    ordered.sort_by(|a, b| {
        angle(a)
            .total_cmp(&angle(b))
            .then_with(|| distance_km(centre, a.pickup).total_cmp(&distance_km(centre, b.pickup)))
            .then_with(|| a.id.cmp(&b.id))
    });
    ordered
}

/// A route together with the anomalies found while timing it.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencedRoute {
    /// Timed route with a default efficiency breakdown.
    pub route: VehicleRoute,
    /// Overflow and lateness warnings for this vehicle.
    pub warnings: Vec<DispatchWarning>,
}

/// Orders and times one vehicle's pickups.
///
/// Holds only shared references, so one sequencer can serve every vehicle
/// of a run from parallel workers.
pub struct RouteSequencer<'a, T: TravelTimeEstimator + ?Sized> {
    /// Leg duration model.
    pub estimator: &'a T,
    /// Weather applied to every leg.
    pub impact: &'a WeatherImpact,
    /// Zone classification for strategy choice and leg speeds.
    pub zones: &'a ZoneMap,
    /// Boarding, tolerance and override settings.
    pub config: DispatcherConfig,
    /// Terminal destination.
    pub activity: &'a ActivityLocation,
    /// Optional delay annotations.
    pub advisor: Option<&'a dyn DelayAdvisor>,
}

#[derive(Debug, Clone, Copy)]
struct Leg {
    distance_km: f64,
    minutes: f64,
    whole_minutes: u32,
}

#[derive(Debug, Clone, Copy)]
struct PlannedPickup {
    time: ClockTime,
    waited: u32,
}

struct Schedule {
    pickups: Vec<PlannedPickup>,
    arrival: ClockTime,
}

struct TimedRoute<'g> {
    zone: Zone,
    strategy: SequencingStrategy,
    departure: ClockTime,
    ordered: Vec<&'g Guest>,
    legs: Vec<Leg>,
    schedule: Schedule,
}

impl<T: TravelTimeEstimator + ?Sized> RouteSequencer<'_, T> {
    /// Strategy for a cluster, honouring the configured override.
    #[must_use]
    pub fn strategy_for(&self, zone: Zone) -> SequencingStrategy {
        self.config
            .strategy_override
            .unwrap_or_else(|| SequencingStrategy::for_zone(zone))
    }

    /// Order, time and annotate one vehicle's pickups.
    #[must_use]
    pub fn sequence(&self, assignment: &VehicleAssignment<'_>) -> SequencedRoute {
        let vehicle = assignment.vehicle;
        let pickups: Vec<LatLng> = assignment.guests.iter().map(|guest| guest.pickup).collect();
        let zone = self.zones.dominant_zone(&pickups);
        let strategy = self.strategy_for(zone);
        let ordered = order_pickups(strategy, vehicle.home, &assignment.guests);
        let legs = self.legs(vehicle.home, &ordered);
        let final_leg_minutes = legs.last().map_or(0, |leg| leg.whole_minutes);

        let mut departure = match (ordered.first(), legs.first()) {
            (Some(first), Some(leg)) => first.window.start().sub_minutes(leg.whole_minutes),
            _ => self
                .activity
                .start_time
                .sub_minutes(self.config.arrival_buffer_minutes.saturating_add(final_leg_minutes)),
        };
        let mut schedule = self.schedule(departure, &ordered, &legs);
        for _ in 0..=ordered.len() {
            let Some(shift) = self.pull_earlier(&ordered, &schedule) else {
                break;
            };
            departure = departure.sub_minutes(shift);
            schedule = self.schedule(departure, &ordered, &legs);
        }
        log::debug!(
            "vehicle {} departs {departure} using {strategy} through {zone}",
            vehicle.id
        );
        self.assemble(
            assignment,
            &TimedRoute {
                zone,
                strategy,
                departure,
                ordered,
                legs,
                schedule,
            },
        )
    }

    fn legs(&self, home: LatLng, ordered: &[&Guest]) -> Vec<Leg> {
        let stops = ordered
            .iter()
            .map(|guest| guest.pickup)
            .chain(std::iter::once(self.activity.location));
        let mut from = home;
        stops
            .map(|to| {
                let zone = self.zones.classify(to);
                let minutes = self.estimator.estimate_minutes(from, to, zone, self.impact);
                let leg = Leg {
                    distance_km: distance_km(from, to),
                    minutes,
                    whole_minutes: whole_minutes(minutes),
                };
                from = to;
                leg
            })
            .collect()
    }

    fn earliest(&self, guest: &Guest) -> ClockTime {
        guest
            .window
            .start()
            .sub_minutes(self.config.window_tolerance_minutes)
    }

    fn schedule(&self, departure: ClockTime, ordered: &[&Guest], legs: &[Leg]) -> Schedule {
        let mut clock = departure;
        let mut pickups = Vec::with_capacity(ordered.len());
        for (guest, leg) in ordered.iter().zip(legs) {
            let arrival = clock.add_minutes(leg.whole_minutes);
            let planned = if arrival < self.earliest(guest) {
                let open = guest.window.start();
                PlannedPickup {
                    time: open,
                    waited: minutes_between(arrival, open),
                }
            } else {
                PlannedPickup {
                    time: arrival,
                    waited: 0,
                }
            };
            clock = planned.time.add_minutes(self.config.boarding_minutes);
            pickups.push(planned);
        }
        let final_leg = legs.last().map_or(0, |leg| leg.whole_minutes);
        Schedule {
            pickups,
            arrival: clock.add_minutes(final_leg),
        }
    }

    /// Minutes to move the departure earlier to relieve the first pickup
    /// that is late beyond tolerance, or `None` when nothing can be gained.
    fn pull_earlier(&self, ordered: &[&Guest], schedule: &Schedule) -> Option<u32> {
        let tolerance = i64::from(self.config.window_tolerance_minutes);
        let mut headroom: Option<u32> = None;
        for (guest, planned) in ordered.iter().zip(&schedule.pickups) {
            let deviation = guest.window.deviation(planned.time);
            if deviation > tolerance {
                let excess = u32::try_from(deviation - tolerance).unwrap_or(u32::MAX);
                let shift = headroom.map_or(excess, |room| room.min(excess));
                return (shift > 0).then_some(shift);
            }
            if planned.waited > 0 {
                // A wait absorbs any earlier departure before it reaches later stops.
                return None;
            }
            let room = minutes_between(self.earliest(guest), planned.time);
            headroom = Some(headroom.map_or(room, |current| current.min(room)));
        }
        None
    }

    #[expect(clippy::float_arithmetic, reason = "route totals")]
    fn assemble(&self, assignment: &VehicleAssignment<'_>, timed: &TimedRoute<'_>) -> SequencedRoute {
        let TimedRoute {
            zone,
            strategy,
            departure,
            ordered,
            legs,
            schedule,
        } = timed;
        let vehicle = assignment.vehicle;
        let tolerance = i64::from(self.config.window_tolerance_minutes);
        let mut warnings = Vec::new();
        let overflow = assignment.overflow();
        if overflow > 0 {
            warnings.push(DispatchWarning::CapacityOverflow {
                vehicle_id: vehicle.id.clone(),
                overflow,
            });
        }

        let mut stops = Vec::with_capacity(ordered.len().saturating_add(1));
        for ((guest, leg), planned) in ordered.iter().zip(legs).zip(&schedule.pickups) {
            let deviation = guest.window.deviation(planned.time);
            if deviation > tolerance {
                log::warn!(
                    "vehicle {} collects guest {} {deviation} min after the window closes",
                    vehicle.id,
                    guest.id
                );
                warnings.push(DispatchWarning::LatePickup {
                    vehicle_id: vehicle.id.clone(),
                    guest_id: guest.id.clone(),
                    minutes_late: deviation,
                });
            }
            stops.push(RouteStop {
                kind: StopKind::Pickup {
                    guest_id: guest.id.clone(),
                    guest_name: guest.name.clone(),
                    party_size: guest.party_size,
                    hotel: guest.hotel.clone(),
                    notes: guest.notes.clone(),
                },
                location: guest.pickup,
                time: planned.time,
                distance_from_previous_km: leg.distance_km,
                travel_minutes: leg.minutes,
                compliance: compliance(deviation),
                deviation_minutes: deviation,
                nudged: planned.waited > 0,
                advisory_delay_minutes: self
                    .advisor
                    .and_then(|advisor| advisor.advise(vehicle, guest, planned.time, self.impact)),
            });
        }

        let final_leg = legs.last().copied().unwrap_or(Leg {
            distance_km: 0.0,
            minutes: 0.0,
            whole_minutes: 0,
        });
        let lateness = schedule.arrival.minutes_since(self.activity.start_time);
        if lateness > 0 {
            warnings.push(DispatchWarning::LateArrival {
                vehicle_id: vehicle.id.clone(),
                minutes_late: lateness,
            });
        } else if -lateness < i64::from(self.config.arrival_buffer_minutes) {
            warnings.push(DispatchWarning::TightArrival {
                vehicle_id: vehicle.id.clone(),
                minutes_to_spare: -lateness,
            });
        }
        stops.push(RouteStop {
            kind: StopKind::Activity {
                name: self.activity.name.clone(),
            },
            location: self.activity.location,
            time: schedule.arrival,
            distance_from_previous_km: final_leg.distance_km,
            travel_minutes: final_leg.minutes,
            compliance: if lateness > 0 {
                Compliance::Late
            } else {
                Compliance::OnTime
            },
            deviation_minutes: lateness,
            nudged: false,
            advisory_delay_minutes: None,
        });

        let boarding = f64::from(self.config.boarding_minutes) * f64::from(len_u32(ordered.len()));
        let route = VehicleRoute {
            vehicle_id: vehicle.id.clone(),
            vehicle_name: vehicle.name.clone(),
            driver: vehicle.driver.clone(),
            departure: *departure,
            stops,
            total_distance_km: legs.iter().map(|leg| leg.distance_km).sum(),
            total_duration_minutes: legs.iter().map(|leg| leg.minutes).sum::<f64>() + boarding,
            idle_minutes: schedule
                .pickups
                .iter()
                .map(|planned| f64::from(planned.waited))
                .sum(),
            passenger_count: assignment.load,
            capacity: vehicle.capacity,
            overflow,
            zone: *zone,
            strategy: *strategy,
            efficiency: RouteEfficiency::default(),
        };
        SequencedRoute { route, warnings }
    }
}

const fn compliance(deviation: i64) -> Compliance {
    match deviation.signum() {
        -1 => Compliance::Early,
        1 => Compliance::Late,
        _ => Compliance::OnTime,
    }
}

fn minutes_between(earlier: ClockTime, later: ClockTime) -> u32 {
    u32::try_from(later.minutes_since(earlier).max(0)).unwrap_or(u32::MAX)
}

fn len_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is finite, non-negative and clamped below u32::MAX"
)]
fn whole_minutes(minutes: f64) -> u32 {
    if !minutes.is_finite() || minutes <= 0.0 {
        return 0;
    }
    minutes.ceil().min(f64::from(u32::MAX)) as u32
}
