//! Unit tests for pisr-behavior.

use pisr_core::{Point, TaskId, VehicleId};
use pisr_fleet::{Commitment, Database, Task, TaskRegistry, TrackedFields, VehicleState};
use pisr_pathing::PathingStrategy;

use crate::{Md2wrp, Routing, RoutingPolicy};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn tasks(points: &[(f64, f64)]) -> TaskRegistry {
    let points: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
    TaskRegistry::from_positions(&points)
}

fn vehicle(index: usize, start: u32) -> VehicleState {
    VehicleState::new(
        VehicleId((index as u32 + 1) * 100),
        index,
        TaskId(start),
        0.0,
        25.0,
        30f64.to_radians(),
        0.0,
        f64::INFINITY,
    )
    .unwrap()
}

fn md2wrp(reg: &TaskRegistry, measure: PathingStrategy) -> Md2wrp {
    Md2wrp::new(5.0, vec![1.0; reg.len()], measure, reg, 25.0).unwrap()
}

fn routing(reg: &TaskRegistry, v: &VehicleState) -> Routing {
    Routing::new(RoutingPolicy::Md2wrp(md2wrp(reg, PathingStrategy::Euclidean)), v)
}

// ── MD2WRP ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod md2wrp {
    use super::*;
    use crate::{norm_factor, BehaviorError, UTILITY_SCALE};

    #[test]
    fn norm_factor_is_longest_leg_time() {
        let reg = tasks(&[(0.0, 0.0), (1000.0, 0.0), (0.0, 500.0)]);
        assert_eq!(norm_factor(&reg, 25.0), 40.0);
        assert_eq!(norm_factor(&tasks(&[(5.0, 5.0), (5.0, 5.0)]), 25.0), 1.0);
    }

    #[test]
    fn two_task_choice() {
        let reg = tasks(&[(0.0, 0.0), (1000.0, 0.0)]);
        let v = vehicle(0, 1);
        let db = Database::seed(0, TrackedFields::ALL, &reg, &[v.clone()]);
        let mut r = routing(&reg, &v);

        let d = r.select_next(&v, &db, reg.as_slice()).unwrap();
        assert_eq!(d.task, TaskId(2));
        assert_eq!(d.heading, None);
        assert_eq!(d.utilities[0], 0.0);
        let expected = (-5.0f64).exp() * (40.0 / 40.0) * UTILITY_SCALE;
        assert!((d.utilities[1] - expected).abs() < 1e-9);
    }

    #[test]
    fn conflict_zeroes_utility_and_diverts() {
        let reg = tasks(&[(0.0, 0.0), (1000.0, 0.0), (0.0, 2000.0)]);
        let a = vehicle(0, 1);
        let b = vehicle(1, 1);
        let mut db = Database::seed(0, TrackedFields::ALL, &reg, &[a.clone(), b]);
        db.age_tracker = vec![0.0, 100.0, 100.0];
        let mut r = routing(&reg, &a);

        // Unopposed, the nearer task 2 wins.
        assert_eq!(r.select_next(&a, &db, reg.as_slice()).unwrap().task, TaskId(2));

        // Peer B arrives at task 2 no earlier than A could.
        db.vehicle_tracker[1] = Commitment { destination: TaskId(2), arrival_time: 40.0 };
        let d = r.select_next(&a, &db, reg.as_slice()).unwrap();
        assert_eq!(d.utilities[1], 0.0);
        assert!(d.utilities[2] > 0.0);
        assert_eq!(d.task, TaskId(3));
    }

    #[test]
    fn interim_visit_uses_residual_age() {
        let reg = tasks(&[(0.0, 0.0), (1000.0, 0.0)]);
        let a = vehicle(0, 1);
        let mut db = Database::seed(0, TrackedFields::ALL, &reg, &[a.clone(), vehicle(1, 1)]);
        db.age_tracker = vec![0.0, 100.0];
        let policy = md2wrp(&reg, PathingStrategy::Euclidean);
        let candidates = PathingStrategy::Euclidean.candidate_times(&a, reg.as_slice()).unwrap();

        // Peer services task 2 at t=10, 30 s before A would: effective age 30.
        db.vehicle_tracker[1] = Commitment { destination: TaskId(2), arrival_time: 10.0 };
        let u = policy.utilities(&a, &db, reg.as_slice(), &candidates);
        let expected = (-5.0f64).exp() * (30.0 / 40.0) * UTILITY_SCALE;
        assert!((u[1] - expected).abs() < 1e-9);

        // A residual no smaller than age + t_ij leaves the tracked age alone.
        db.age_tracker = vec![0.0, 0.0];
        db.vehicle_tracker[1] = Commitment { destination: TaskId(2), arrival_time: 0.0 };
        let u = policy.utilities(&a, &db, reg.as_slice(), &candidates);
        let expected = (-5.0f64).exp() * (40.0 / 40.0) * UTILITY_SCALE;
        assert!((u[1] - expected).abs() < 1e-9);
    }

    #[test]
    fn own_slot_is_never_a_conflict() {
        let reg = tasks(&[(0.0, 0.0), (1000.0, 0.0)]);
        let a = vehicle(0, 1);
        let mut db = Database::seed(0, TrackedFields::ALL, &reg, &[a.clone()]);
        db.record_own(Commitment { destination: TaskId(2), arrival_time: 1e9 });
        let mut r = routing(&reg, &a);
        assert!(r.select_next(&a, &db, reg.as_slice()).unwrap().utilities[1] > 0.0);
    }

    #[test]
    fn inactive_task_has_zero_utility() {
        let mut late = Task::new(TaskId(2), Point::new(1000.0, 0.0));
        late.activation_time = 100.0;
        let reg = TaskRegistry::new(vec![Task::new(TaskId(1), Point::default()), late]).unwrap();
        let mut a = vehicle(0, 1);
        let mut db = Database::seed(0, TrackedFields::ALL, &reg, &[a.clone()]);
        db.age_tracker = vec![0.0, 500.0];
        let mut r = routing(&reg, &a);

        assert_eq!(r.select_next(&a, &db, reg.as_slice()).unwrap().utilities[1], 0.0);
        a.time = 100.0;
        assert!(r.select_next(&a, &db, reg.as_slice()).unwrap().utilities[1] > 0.0);
    }

    #[test]
    fn all_zero_falls_back_to_first_task() {
        let reg = tasks(&[(0.0, 0.0), (1000.0, 0.0)]);
        let a = vehicle(0, 2);
        let mut db = Database::seed(0, TrackedFields::ALL, &reg, &[a.clone(), vehicle(1, 1)]);
        // Peer owns task 1; task 2 is where A stands with nothing to gain.
        db.vehicle_tracker[1] = Commitment { destination: TaskId(1), arrival_time: 1e6 };
        let mut r = routing(&reg, &a);

        let d = r.select_next(&a, &db, reg.as_slice()).unwrap();
        assert_eq!(d.utilities, vec![0.0, 0.0]);
        assert_eq!(d.task, TaskId(1));
    }

    #[test]
    fn dubins_measure_carries_heading() {
        let reg = tasks(&[(0.0, 0.0), (1000.0, 0.0)]);
        let a = vehicle(0, 1);
        let mut db = Database::seed(0, TrackedFields::ALL, &reg, &[a.clone()]);
        // A loop back to the current task has a positive travel time, so give
        // task 2 enough age to dominate it.
        db.age_tracker = vec![0.0, 1000.0];
        let mut r = Routing::new(RoutingPolicy::Md2wrp(md2wrp(&reg, PathingStrategy::dubins())), &a);
        let d = r.select_next(&a, &db, reg.as_slice()).unwrap();
        assert_eq!(d.task, TaskId(2));
        assert_eq!(d.heading, Some(0.0));
    }

    #[test]
    fn rejects_mismatched_weights() {
        let reg = tasks(&[(0.0, 0.0), (1000.0, 0.0)]);
        let err = Md2wrp::new(5.0, vec![1.0], PathingStrategy::Euclidean, &reg, 25.0);
        assert!(matches!(err, Err(BehaviorError::Config(_))));
    }
}

// ── Manual ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod manual {
    use super::*;
    use crate::{BehaviorError, ManualSequence};

    #[test]
    fn cycles_and_wraps() {
        let reg = tasks(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let v = vehicle(0, 1);
        let db = Database::seed(0, TrackedFields::NONE, &reg, &[v.clone()]);
        let seq = ManualSequence::new(vec![TaskId(1), TaskId(2), TaskId(3)], 0, &reg).unwrap();
        let mut r = Routing::new(RoutingPolicy::Manual(seq), &v);

        let picks: Vec<TaskId> = (0..4).map(|_| r.select_next(&v, &db, reg.as_slice()).unwrap().task).collect();
        assert_eq!(picks, vec![TaskId(2), TaskId(3), TaskId(1), TaskId(2)]);
    }

    #[test]
    fn validates_sequence() {
        let reg = tasks(&[(0.0, 0.0)]);
        assert!(matches!(ManualSequence::new(vec![], 0, &reg), Err(BehaviorError::EmptySequence)));
        assert!(matches!(
            ManualSequence::new(vec![TaskId(4)], 0, &reg),
            Err(BehaviorError::UnknownTask(TaskId(4)))
        ));
        assert!(ManualSequence::new(vec![TaskId(1)], 1, &reg).is_err());
    }

    #[test]
    fn commit_updates_own_slot() {
        let reg = tasks(&[(0.0, 0.0), (1.0, 0.0)]);
        let v = vehicle(1, 1);
        let mut db = Database::seed(1, TrackedFields::NONE, &reg, &[vehicle(0, 2), v.clone()]);
        let seq = ManualSequence::new(vec![TaskId(1), TaskId(2)], 0, &reg).unwrap();
        let mut r = Routing::new(RoutingPolicy::Manual(seq), &v);

        r.commit(TaskId(2), 12.5, &mut db);
        assert_eq!(r.destination, TaskId(2));
        assert_eq!(r.arrival_time, 12.5);
        assert_eq!(db.own_commitment(), Commitment { destination: TaskId(2), arrival_time: 12.5 });
        assert_eq!(db.vehicle_tracker[0].destination, TaskId(2));
    }
}

// ── Communication ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod communication {
    use super::*;
    use crate::{CommunicationStrategy, Disclosure};

    fn fleet_databases(fields: [TrackedFields; 3]) -> Vec<Database> {
        let reg = tasks(&[(0.0, 0.0), (1000.0, 0.0)]);
        let vehicles = vec![vehicle(0, 1), vehicle(1, 1), vehicle(2, 2)];
        let mut dbs: Vec<Database> = fields
            .iter()
            .enumerate()
            .map(|(slot, &f)| {
                let mut db = Database::seed(slot, f, &reg, &vehicles);
                db.age_tracker = vec![77.0, 77.0];
                db
            })
            .collect();
        dbs[1].record_own(Commitment { destination: TaskId(2), arrival_time: 50.0 });
        dbs[2].record_own(Commitment { destination: TaskId(1), arrival_time: 70.0 });
        dbs
    }

    fn disclosure() -> Disclosure {
        Disclosure {
            vehicle:    0,
            visited:    TaskId(1),
            visit_time: 20.0,
            commitment: Commitment { destination: TaskId(2), arrival_time: 60.0 },
        }
    }

    #[test]
    fn none_is_silent() {
        let mut dbs = fleet_databases([TrackedFields::ALL; 3]);
        CommunicationStrategy::None.disclose(&disclosure(), &mut dbs);
        assert!(dbs.iter().all(|db| db.age_tracker == vec![77.0, 77.0]));
    }

    #[test]
    fn completion_sets_peer_ages_only() {
        let mut dbs = fleet_databases([TrackedFields::ALL; 3]);
        CommunicationStrategy::Completion.disclose(&disclosure(), &mut dbs);

        assert_eq!(dbs[0].age_tracker, vec![77.0, 77.0]);
        assert_eq!(dbs[1].age_tracker, vec![30.0, 77.0]);
        assert_eq!(dbs[2].age_tracker, vec![50.0, 77.0]);
        assert_eq!(dbs[1].vehicle_tracker[0].destination, TaskId(1));
    }

    #[test]
    fn destination_also_publishes_commitment() {
        let mut dbs = fleet_databases([TrackedFields::ALL; 3]);
        CommunicationStrategy::Destination.disclose(&disclosure(), &mut dbs);

        assert_eq!(dbs[1].age_tracker[0], 30.0);
        for db in &dbs[1..] {
            assert_eq!(db.vehicle_tracker[0], disclosure().commitment);
        }
        // The decider's database is untouched.
        assert_eq!(dbs[0].vehicle_tracker[0].arrival_time, 0.0);
    }

    #[test]
    fn respects_peer_tracked_fields() {
        let ages_only = TrackedFields { age_tracker: true, vehicle_tracker: false };
        let mut dbs = fleet_databases([TrackedFields::ALL, ages_only, TrackedFields::NONE]);
        CommunicationStrategy::Destination.disclose(&disclosure(), &mut dbs);

        assert_eq!(dbs[1].age_tracker[0], 30.0);
        assert_eq!(dbs[1].vehicle_tracker[0].destination, TaskId(1));
        assert_eq!(dbs[2].age_tracker[0], 77.0);
        assert_eq!(dbs[2].vehicle_tracker[0].destination, TaskId(1));
    }
}
