//! Unit tests for pisr-fleet.

use pisr_core::{Point, TaskId, VehicleId};

use crate::{Task, TaskRegistry, VehicleState};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn two_tasks() -> TaskRegistry {
    TaskRegistry::from_positions(&[Point::new(0.0, 0.0), Point::new(1000.0, 0.0)])
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

// ── Task registry ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry {
    use super::*;
    use crate::FleetError;

    #[test]
    fn ids_are_one_based_and_ordered() {
        let reg = two_tasks();
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(TaskId(1)).unwrap().position, Point::new(0.0, 0.0));
        assert_eq!(reg.get(TaskId(2)).unwrap().position, Point::new(1000.0, 0.0));
        assert!(reg.get(TaskId(0)).is_none());
        assert!(reg.get(TaskId(3)).is_none());
    }

    #[test]
    fn rejects_out_of_order_ids() {
        let tasks = vec![Task::new(TaskId(2), Point::default())];
        assert!(matches!(TaskRegistry::new(tasks), Err(FleetError::TaskOrder { .. })));
    }

    #[test]
    fn rejects_inverted_window() {
        let mut t = Task::new(TaskId(1), Point::default());
        t.activation_time = 50.0;
        t.termination_time = 10.0;
        assert!(matches!(TaskRegistry::new(vec![t]), Err(FleetError::Config(_))));
    }

    #[test]
    fn accrue_and_reset() {
        let mut reg = two_tasks();
        reg.accrue(0.0, 40.0);
        assert_eq!(reg.ages(), vec![40.0, 40.0]);
        reg.reset(TaskId(2)).unwrap();
        reg.accrue(40.0, 80.0);
        assert_eq!(reg.ages(), vec![80.0, 40.0]);
        assert!(reg.reset(TaskId(9)).is_err());
    }

    #[test]
    fn inactive_task_pinned_to_zero() {
        let mut late = Task::new(TaskId(1), Point::default());
        late.activation_time = 100.0;
        let mut ended = Task::new(TaskId(2), Point::new(10.0, 0.0));
        ended.age = 30.0;
        ended.termination_time = 20.0;
        let mut reg = TaskRegistry::new(vec![late, ended]).unwrap();

        reg.accrue(0.0, 60.0);
        assert_eq!(reg.ages(), vec![0.0, 0.0]);

        // Only the part of the interval after activation counts.
        reg.accrue(60.0, 130.0);
        assert_eq!(reg.ages()[0], 30.0);
    }

    #[test]
    fn pairwise_distances() {
        let reg = TaskRegistry::from_positions(&[
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(6.0, 0.0),
        ]);
        assert_eq!(reg.max_pairwise_distance(), 6.0);
        // (5 + 6 + 5) / 3 over unordered pairs.
        assert!((reg.mean_pairwise_distance() - 16.0 / 3.0).abs() < 1e-12);
        assert_eq!(TaskRegistry::from_positions(&[Point::default()]).max_pairwise_distance(), 0.0);
    }
}

// ── Vehicle state ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod vehicle_state {
    use super::*;

    #[test]
    fn derives_turn_radius_and_start_clock() {
        let v = VehicleState::new(VehicleId(100), 0, TaskId(1), 0.0, 25.0, 30f64.to_radians(), 15.0, 500.0)
            .unwrap();
        assert!((v.turn_radius - 110.38).abs() < 0.05);
        assert_eq!(v.time, 15.0);
        assert_eq!(v.location, TaskId(1));
        assert_eq!(v.travel_time(1000.0), 40.0);
        assert!(v.is_active_for(499.0));
        assert!(!v.is_active_for(500.0));
    }

    #[test]
    fn rejects_bad_parameters() {
        let bank = 30f64.to_radians();
        assert!(VehicleState::new(VehicleId(1), 0, TaskId(1), 0.0, 0.0, bank, 0.0, 1.0).is_err());
        assert!(VehicleState::new(VehicleId(1), 0, TaskId(1), 0.0, 20.0, 0.0, 0.0, 1.0).is_err());
        assert!(VehicleState::new(VehicleId(1), 0, TaskId(1), 0.0, 20.0, 1.7, 0.0, 1.0).is_err());
    }
}

// ── Database ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod database {
    use super::*;
    use crate::{Commitment, Database, TrackedFields};

    #[test]
    fn seeded_from_truth_and_start_states() {
        let mut reg = two_tasks();
        reg.accrue(0.0, 5.0);
        let vehicles = vec![vehicle(0, 1), vehicle(1, 2)];
        let db = Database::seed(1, TrackedFields::ALL, &reg, &vehicles);

        assert_eq!(db.age_tracker, vec![5.0, 5.0]);
        assert_eq!(db.own_commitment(), Commitment { destination: TaskId(2), arrival_time: 0.0 });
        let peers: Vec<_> = db.peer_commitments().map(|(slot, _)| slot).collect();
        assert_eq!(peers, vec![0]);
    }

    #[test]
    fn untracked_fields_ignore_peer_writes() {
        let reg = two_tasks();
        let vehicles = vec![vehicle(0, 1), vehicle(1, 1)];
        let mut db = Database::seed(0, TrackedFields::NONE, &reg, &vehicles);

        db.observe_age(TaskId(2), 99.0);
        db.observe_commitment(1, Commitment { destination: TaskId(2), arrival_time: 7.0 });
        assert_eq!(db.age_tracker, vec![0.0, 0.0]);
        assert_eq!(db.vehicle_tracker[1].destination, TaskId(1));

        // The owner's own slot is always written.
        db.record_own(Commitment { destination: TaskId(2), arrival_time: 40.0 });
        assert_eq!(db.own_commitment().arrival_time, 40.0);
    }

    #[test]
    fn project_ages_respects_windows() {
        let mut late = Task::new(TaskId(2), Point::new(1.0, 0.0));
        late.activation_time = 100.0;
        let reg = TaskRegistry::new(vec![Task::new(TaskId(1), Point::default()), late]).unwrap();
        let mut db = Database::seed(0, TrackedFields::ALL, &reg, &[vehicle(0, 1)]);

        db.project_ages(reg.as_slice(), 0.0, 40.0);
        assert_eq!(db.age_tracker, vec![40.0, 0.0]);
        db.project_ages(reg.as_slice(), 90.0, 120.0);
        assert_eq!(db.age_tracker, vec![70.0, 20.0]);

        db.clear_age(TaskId(1));
        assert_eq!(db.age_tracker[0], 0.0);
    }
}
