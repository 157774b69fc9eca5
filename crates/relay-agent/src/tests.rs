//! Unit tests for relay-agent.

use relay_core::{AgentRng, DataId, DroneId, LinkThresholds, PackageId, Point, RouteId, ScoutId, Tick, WorkerId};
use relay_routing::Route;
use relay_spatial::NodeSnapshot;

use crate::{AgentError, ExplorePhase, Scout, ScoutRngs, SendPhase, Worker, WorkerOutcome};

// ── Helpers ───────────────────────────────────────────────────────────────────

const T: LinkThresholds = LinkThresholds::new(5.0, 10.0, 15.0);

/// Drones 0..n on the y axis at the given heights.
fn column(ys: &[f64]) -> NodeSnapshot {
    NodeSnapshot::new(
        ys.iter()
            .enumerate()
            .map(|(i, &y)| (DroneId(i as u32), Point::new(0.0, y))),
    )
}

fn rng() -> AgentRng {
    AgentRng::new(42, 0)
}

fn scout(end: u32, energy: f64) -> Scout {
    Scout::new(ScoutId(0), DroneId(0), DroneId(end), energy)
}

fn returning_scout(path: &[u32]) -> Scout {
    let mut s = scout(*path.last().unwrap(), 100.0);
    s.visited = path.iter().map(|&i| DroneId(i)).collect();
    s.cursor = path.len() - 1;
    s.phase = ExplorePhase::GoingBack;
    s
}

fn route(raw: &[u32], distances: &[f64]) -> Route {
    let hops = raw.iter().map(|&i| DroneId(i)).collect();
    Route::new(RouteId(0), hops, distances.to_vec(), &T).unwrap()
}

fn worker_at(route: &Route, node: u32, phase: SendPhase) -> Worker {
    let mut w = Worker::new(WorkerId(0), route, DataId(0), PackageId(0), Tick(10));
    w.current = DroneId(node);
    w.phase = phase;
    w
}

// ── Scout: forward exploration ────────────────────────────────────────────────

#[cfg(test)]
mod scout_forward {
    use super::*;

    #[test]
    fn safe_band_preferred_over_close() {
        let snap = column(&[0.0, 1.0, 10.0]);
        let mut s = scout(2, 100.0);
        assert!(s.explore(&snap, &T, &mut rng()).unwrap());
        assert_eq!(s.current_node(), DroneId(1));
        assert_eq!(s.visited_path(), &[DroneId(0), DroneId(1)]);
        assert_eq!(s.energy(), 99.0);
        assert_eq!(s.phase(), ExplorePhase::SearchingEnd);
    }

    #[test]
    fn close_band_preferred_over_danger() {
        let snap = column(&[0.0, 6.0, 11.0]);
        let mut s = scout(2, 100.0);
        assert!(s.explore(&snap, &T, &mut rng()).unwrap());
        assert_eq!(s.current_node(), DroneId(1));
        // cost of a 6-unit hop is 2
        assert_eq!(s.energy(), 98.0);
    }

    #[test]
    fn danger_band_used_when_nothing_else() {
        let snap = column(&[0.0, 11.0, 20.0]);
        let mut s = scout(2, 100.0);
        assert!(s.explore(&snap, &T, &mut rng()).unwrap());
        assert_eq!(s.current_node(), DroneId(1));
    }

    #[test]
    fn no_reachable_neighbour_is_stuck() {
        let snap = column(&[0.0, 20.0, 20.0]);
        let mut s = scout(2, 100.0);
        assert!(!s.explore(&snap, &T, &mut rng()).unwrap());
        assert_eq!(s.phase(), ExplorePhase::Stuck);
        assert_eq!(s.visited_path(), &[DroneId(0)]);
    }

    #[test]
    fn zero_energy_is_stuck() {
        let snap = column(&[0.0, 1.0, 2.0]);
        let mut s = scout(2, 0.0);
        assert!(!s.explore(&snap, &T, &mut rng()).unwrap());
        assert_eq!(s.phase(), ExplorePhase::Stuck);
        assert_eq!(s.visited_path(), &[DroneId(0)]);
    }

    #[test]
    fn visited_drones_are_not_revisited() {
        // From 1, drone 0 is the only safe neighbour but already visited.
        let snap = column(&[0.0, 1.0, 8.0]);
        let mut s = scout(2, 100.0);
        s.explore(&snap, &T, &mut rng()).unwrap();
        assert_eq!(s.current_node(), DroneId(1));
        s.explore(&snap, &T, &mut rng()).unwrap();
        assert_eq!(s.current_node(), DroneId(2));
        assert_eq!(s.phase(), ExplorePhase::GoingBack);
    }

    #[test]
    fn terminal_scout_is_a_noop() {
        let snap = column(&[0.0, 20.0]);
        let mut s = scout(1, 100.0);
        s.explore(&snap, &T, &mut rng()).unwrap();
        assert_eq!(s.phase(), ExplorePhase::Stuck);
        let before = s.clone();
        assert!(!s.explore(&snap, &T, &mut rng()).unwrap());
        assert_eq!(s, before);
    }

    #[test]
    fn missing_drone_is_an_error() {
        let snap = NodeSnapshot::empty();
        let mut s = scout(1, 100.0);
        let err = s.explore(&snap, &T, &mut rng()).unwrap_err();
        assert!(matches!(err, AgentError::Spatial(_)));
    }
}

// ── Scout: confirmation walk ──────────────────────────────────────────────────

#[cfg(test)]
mod scout_back {
    use super::*;

    #[test]
    fn distances_are_prepended_in_path_order() {
        let snap = column(&[0.0, 3.0, 10.0]);
        let mut s = returning_scout(&[0, 1, 2]);

        assert!(s.explore(&snap, &T, &mut rng()).unwrap());
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.confirmed_distances(), vec![7.0]);
        assert_eq!(s.phase(), ExplorePhase::GoingBack);

        assert!(!s.explore(&snap, &T, &mut rng()).unwrap());
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.confirmed_distances(), vec![3.0, 7.0]);
        assert_eq!(s.phase(), ExplorePhase::Ended);
    }

    #[test]
    fn broken_link_is_stuck() {
        let snap = column(&[0.0, 3.0, 30.0]);
        let mut s = returning_scout(&[0, 1, 2]);
        assert!(!s.explore(&snap, &T, &mut rng()).unwrap());
        assert_eq!(s.phase(), ExplorePhase::Stuck);
        assert!(s.confirmed_distances().is_empty());
        assert!(s.discovered_route().is_none());
    }

    #[test]
    fn full_round_on_a_line() {
        // Only the adjacent drone is ever in the safe band.
        let snap = column(&[0.0, 4.0, 8.0, 12.0, 16.0]);
        let mut s = scout(4, 100.0);
        let mut r = rng();
        for _ in 0..64 {
            if s.phase().is_terminal() {
                break;
            }
            s.explore(&snap, &T, &mut r).unwrap();
        }
        let (hops, distances) = s.discovered_route().expect("scout should end");
        assert_eq!(hops, (0..5).map(DroneId).collect::<Vec<_>>());
        assert_eq!(distances, vec![4.0; 4]);
    }

    #[test]
    fn reset_restores_a_fresh_round() {
        let snap = column(&[0.0, 3.0, 10.0]);
        let mut s = returning_scout(&[0, 1, 2]);
        s.explore(&snap, &T, &mut rng()).unwrap();
        s.reset(50.0);
        assert_eq!(s, scout(2, 50.0));
    }
}

// ── Scout RNG streams ─────────────────────────────────────────────────────────

#[cfg(test)]
mod streams {
    use super::*;

    #[test]
    fn same_seed_same_walk() {
        // Drones scattered in a ring so several safe choices exist.
        let snap = NodeSnapshot::new((0..12).map(|i| {
            let a = i as f64 * std::f64::consts::TAU / 12.0;
            (DroneId(i), Point::new(10.0 + 4.0 * a.cos(), 10.0 + 4.0 * a.sin()))
        }));
        let walk = |seed| {
            let mut rngs = ScoutRngs::new(1, seed);
            let mut s = scout(6, 100.0);
            for _ in 0..5 {
                s.explore(&snap, &T, rngs.get_mut(ScoutId(0))).unwrap();
            }
            s.visited_path().to_vec()
        };
        assert_eq!(walk(7), walk(7));
    }

    #[test]
    fn first_scout_does_not_share_the_root_seed() {
        let picks = |rng: &mut AgentRng| -> Vec<u32> {
            let pool: Vec<u32> = (0..1000).collect();
            (0..16).map(|_| *rng.choose(&pool).unwrap()).collect()
        };
        let mut rngs = ScoutRngs::new(2, 9);
        // Stream 0 is seeded exactly like `SimRng::new(9)`.
        let root_like = picks(&mut AgentRng::new(9, 0));
        assert_ne!(picks(rngs.get_mut(ScoutId(0))), root_like);
        assert_ne!(picks(rngs.get_mut(ScoutId(0))), picks(rngs.get_mut(ScoutId(1))));
    }

    #[test]
    fn one_stream_per_scout() {
        let rngs = ScoutRngs::new(4, 1);
        assert_eq!(rngs.len(), 4);
        assert!(!rngs.is_empty());
    }
}

// ── Worker: forward ───────────────────────────────────────────────────────────

#[cfg(test)]
mod worker_forward {
    use super::*;

    #[test]
    fn new_worker_sits_on_first_hop() {
        let r = route(&[3, 5, 8], &[1.0, 1.0]);
        let w = Worker::new(WorkerId(2), &r, DataId(1), PackageId(4), Tick(7));
        assert_eq!(w.current_node(), DroneId(3));
        assert_eq!(w.next_eligible_tick(), Tick(7));
        assert_eq!(w.phase(), SendPhase::SendingForward);
        assert_eq!(w.route_id(), RouteId(0));
    }

    #[test]
    fn hop_claims_link_and_waits_out_its_cost() {
        let snap = column(&[0.0, 7.0, 10.0]);
        let mut r = route(&[0, 1, 2], &[7.0, 3.0]);
        let mut w = worker_at(&r, 0, SendPhase::SendingForward);

        let out = w.step(&snap, Tick(10), &mut r, &T).unwrap();
        assert_eq!(out, WorkerOutcome::Continue);
        assert_eq!(w.current_node(), DroneId(1));
        assert!(r.is_occupied(0));
        // cost of a 7-unit hop is 3
        assert_eq!(w.next_eligible_tick(), Tick(13));

        w.step(&snap, Tick(13), &mut r, &T).unwrap();
        assert_eq!(w.current_node(), DroneId(2));
        assert_eq!(r.occupancy(), &[false, true]);
        assert_eq!(w.next_eligible_tick(), Tick(14));
    }

    #[test]
    fn last_hop_turns_back() {
        let snap = column(&[0.0, 1.0, 2.0]);
        let mut r = route(&[0, 1, 2], &[1.0, 1.0]);
        r.occupy(1);
        let mut w = worker_at(&r, 2, SendPhase::SendingForward);
        w.holding = Some(1);

        let out = w.step(&snap, Tick(20), &mut r, &T).unwrap();
        assert_eq!(out, WorkerOutcome::Continue);
        assert_eq!(w.phase(), SendPhase::GoingBack);
        assert_eq!(w.next_eligible_tick(), Tick(21));
        assert_eq!(w.current_node(), DroneId(2));
        assert!(!r.is_occupied(1));
    }

    #[test]
    fn occupied_link_is_contention() {
        let snap = column(&[0.0, 1.0, 2.0]);
        let mut r = route(&[0, 1, 2], &[1.0, 1.0]);
        r.occupy(1);
        let mut w = worker_at(&r, 1, SendPhase::SendingForward);
        let before = w.clone();

        let out = w.step(&snap, Tick(20), &mut r, &T).unwrap();
        assert_eq!(out, WorkerOutcome::Contention);
        assert_eq!(w, before);
        assert!(r.is_occupied(1));
    }

    #[test]
    fn retry_after_contention_keeps_foreign_claim() {
        let snap = column(&[0.0, 1.0, 2.0, 3.0]);
        let mut r = route(&[0, 1, 2, 3], &[1.0, 1.0, 1.0]);
        r.occupy(1);
        let mut a = worker_at(&r, 0, SendPhase::SendingForward);
        let mut b = Worker::new(WorkerId(1), &r, DataId(0), PackageId(1), Tick(10));

        assert_eq!(a.step(&snap, Tick(10), &mut r, &T).unwrap(), WorkerOutcome::Continue);
        assert_eq!(a.step(&snap, Tick(11), &mut r, &T).unwrap(), WorkerOutcome::Contention);
        assert!(!r.is_occupied(0));

        // b crosses the link a just left
        assert_eq!(b.step(&snap, Tick(11), &mut r, &T).unwrap(), WorkerOutcome::Continue);
        assert!(r.is_occupied(0));

        assert_eq!(a.step(&snap, Tick(12), &mut r, &T).unwrap(), WorkerOutcome::Contention);
        assert!(r.is_occupied(0), "b still holds link 0");
        assert_eq!(a.current_node(), DroneId(1));

        r.release(1);
        assert_eq!(a.step(&snap, Tick(13), &mut r, &T).unwrap(), WorkerOutcome::Continue);
        assert_eq!(r.occupancy(), &[true, true, false]);

        assert_eq!(b.step(&snap, Tick(13), &mut r, &T).unwrap(), WorkerOutcome::Contention);
        assert_eq!(r.occupancy(), &[false, true, false]);
    }

    #[test]
    fn out_of_range_link_breaks_forward() {
        let snap = column(&[0.0, 16.0]);
        let mut r = route(&[0, 1], &[4.0]);
        let mut w = worker_at(&r, 0, SendPhase::SendingForward);
        let out = w.step(&snap, Tick(10), &mut r, &T).unwrap();
        assert_eq!(out, WorkerOutcome::ForwardBreak);
        assert_eq!(w.phase(), SendPhase::Stuck);
        assert!(!r.is_occupied(0));
    }
}

// ── Worker: return ────────────────────────────────────────────────────────────

#[cfg(test)]
mod worker_back {
    use super::*;

    #[test]
    fn walk_back_confirms_every_link() {
        let snap = column(&[0.0, 2.0, 9.0]);
        let mut r = route(&[0, 1, 2], &[1.0, 1.0]);
        let mut w = worker_at(&r, 2, SendPhase::GoingBack);

        assert_eq!(w.step(&snap, Tick(1), &mut r, &T).unwrap(), WorkerOutcome::Continue);
        assert_eq!(w.current_node(), DroneId(1));
        assert_eq!(w.next_eligible_tick(), Tick(2));
        assert_eq!(w.step(&snap, Tick(2), &mut r, &T).unwrap(), WorkerOutcome::Continue);
        assert_eq!(w.step(&snap, Tick(3), &mut r, &T).unwrap(), WorkerOutcome::Delivered);
        assert_eq!(w.phase(), SendPhase::SendingEnded);
        assert_eq!(w.confirmed_distances(), vec![2.0, 7.0]);
    }

    #[test]
    fn broken_return_link() {
        let snap = column(&[0.0, 2.0, 40.0]);
        let mut r = route(&[0, 1, 2], &[1.0, 1.0]);
        let mut w = worker_at(&r, 2, SendPhase::GoingBack);
        assert_eq!(w.step(&snap, Tick(1), &mut r, &T).unwrap(), WorkerOutcome::ReturnBreak);
        assert_eq!(w.phase(), SendPhase::Stuck);
    }

    #[test]
    fn finished_worker_cannot_step() {
        let snap = column(&[0.0, 1.0]);
        let mut r = route(&[0, 1], &[1.0]);
        let mut w = worker_at(&r, 0, SendPhase::SendingEnded);
        let err = w.step(&snap, Tick(1), &mut r, &T).unwrap_err();
        assert!(matches!(err, AgentError::Finished(WorkerId(0))));
    }

    #[test]
    fn node_off_route_is_an_error() {
        let snap = column(&[0.0, 1.0, 2.0]);
        let mut r = route(&[0, 1], &[1.0]);
        let mut w = worker_at(&r, 2, SendPhase::SendingForward);
        let err = w.step(&snap, Tick(1), &mut r, &T).unwrap_err();
        assert!(matches!(err, AgentError::NotOnRoute { node: DroneId(2), .. }));
    }

    #[test]
    fn wrong_route_is_an_error() {
        let snap = column(&[0.0, 1.0]);
        let r = route(&[0, 1], &[1.0]);
        let mut other = Route::new(RouteId(9), vec![DroneId(0), DroneId(1)], vec![1.0], &T).unwrap();
        let mut w = worker_at(&r, 0, SendPhase::SendingForward);
        let err = w.step(&snap, Tick(1), &mut other, &T).unwrap_err();
        assert!(matches!(err, AgentError::WrongRoute { got: RouteId(9), .. }));
    }
}

// ── Persistence ───────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "serde"))]
mod persistence {
    use super::*;

    #[test]
    fn scout_resumes_identically_after_round_trip() {
        let snap = column(&[0.0, 4.0, 8.0, 12.0, 16.0]);
        let mut s = scout(4, 100.0);
        let mut r = rng();
        for _ in 0..5 {
            s.explore(&snap, &T, &mut r).unwrap();
        }
        assert_eq!(s.phase(), ExplorePhase::GoingBack);

        let json = serde_json::to_string(&s).unwrap();
        let mut restored: Scout = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, s);

        s.explore(&snap, &T, &mut r).unwrap();
        restored.explore(&snap, &T, &mut rng()).unwrap();
        assert_eq!(restored, s);
    }

    #[test]
    fn worker_round_trip() {
        let r = route(&[0, 1, 2], &[1.0, 1.0]);
        let w = worker_at(&r, 1, SendPhase::GoingBack);
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(serde_json::from_str::<Worker>(&json).unwrap(), w);
    }
}
