//! The `Sim` struct and its event loop.

use pisr_behavior::Disclosure;
use pisr_core::{SimConfig, POST_VISIT_OFFSET_SECS};
use pisr_fleet::{Database, TaskRegistry};

use crate::history::{AgeSnapshot, RunHistory, SnapshotPhase, VisitRecord};
use crate::vehicle::Vehicle;
use crate::{SimObserver, SimResult};

/// The main simulation runner.
///
/// Each iteration of [`run`](Self::run) processes exactly one arrival:
///
/// 1. **Decider**: the active vehicle with the earliest predicted arrival
///    (first in slot order on ties).
/// 2. **Arrive**: its location becomes its destination and its clock jumps
///    to the arrival time.  Its own estimate for the task is cleared.
/// 3. **Age**: every task accrues age under its activation window, a
///    pre-visit snapshot is taken, the visited task is reset, and a
///    post-visit snapshot is taken at `+0.01 s`.
/// 4. **Record** the visit with the trajectory that led to it.
/// 5. **Decide + commit**: routing selects the next task and physical
///    pathing commits a path to it.
/// 6. **Self-age**: the decider projects its own age estimates forward to
///    the new arrival time.
/// 7. **Disclose** to peers through the decider's communication strategy.
///
/// The loop ends when the visit or time budget trips, or when no vehicle
/// remains active.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    pub config: SimConfig,

    /// True task state.  Only the loop ages or resets tasks.
    pub tasks: TaskRegistry,

    /// Vehicles in slot order.
    pub vehicles: Vec<Vehicle>,

    /// Private database of each vehicle, indexed by slot.  Kept apart from
    /// `vehicles` so a decider can be borrowed mutably while peers' databases
    /// are written.
    pub databases: Vec<Database>,

    pub history: RunHistory,

    /// Impact rating per vehicle slot, when computed at setup.
    pub impact_ratings: Vec<Option<f64>>,

    /// Time of the most recent arrival.
    pub time: f64,

    /// 1-based number of the next visit.
    pub visit_num: u64,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until a budget trips or no vehicle remains active.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        observer.on_run_start(self.tasks.len(), self.vehicles.len());
        tracing::info!(
            trade = self.config.trade_id,
            tasks = self.tasks.len(),
            vehicles = self.vehicles.len(),
            max_visits = self.config.max_visits,
            max_time_secs = self.config.max_time_secs,
            "run started"
        );

        while self.config.continues(self.visit_num, self.time) {
            if self.step(observer)?.is_none() {
                tracing::info!(time = self.time, "no active vehicle remains; ending run early");
                break;
            }
        }

        self.finish();
        observer.on_run_end(&self.history);
        tracing::info!(
            trade = self.config.trade_id,
            visits = self.history.visits.len(),
            end_time = self.time,
            "run finished"
        );
        Ok(())
    }

    /// Process exactly one arrival, ignoring the budgets.
    ///
    /// Returns the decider's slot, or `None` if no vehicle is active.
    /// Useful for tests and incremental stepping.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<Option<usize>> {
        let Some(slot) = self.select_decider() else {
            return Ok(None);
        };

        // Split borrow: one decider, every database.
        let Sim { tasks, vehicles, databases, history, time, visit_num, .. } = self;
        let vehicle = &mut vehicles[slot];

        // ── Arrive ────────────────────────────────────────────────────────
        let visited = vehicle.routing.destination;
        let now = vehicle.routing.arrival_time;
        vehicle.state.location = visited;
        vehicle.state.time = now;
        databases[slot].clear_age(visited);

        // ── Age and snapshot ──────────────────────────────────────────────
        tasks.accrue(*time, now);
        let pre = AgeSnapshot { time: now, phase: SnapshotPhase::PreVisit, ages: tasks.ages() };
        tasks.reset(visited)?;
        let post = AgeSnapshot {
            time:  now + POST_VISIT_OFFSET_SECS,
            phase: SnapshotPhase::PostVisit,
            ages:  tasks.ages(),
        };
        observer.on_age_snapshot(&pre);
        observer.on_age_snapshot(&post);
        history.ages.push(pre);
        history.ages.push(post);

        // ── Record ────────────────────────────────────────────────────────
        let visit = VisitRecord {
            vehicle_id: vehicle.state.id,
            task_id:    visited,
            time:       now,
            trajectory: std::mem::take(&mut vehicle.trajectory),
        };
        observer.on_visit(&visit);
        history.visits.push(visit);

        // ── Decide + commit ───────────────────────────────────────────────
        let decision = vehicle.routing.select_next(&vehicle.state, &databases[slot], tasks.as_slice())?;
        let path = vehicle.pathing.commit(&vehicle.state, decision.task, decision.heading, tasks.as_slice())?;
        let arrival = now + vehicle.state.travel_time(path.length);
        tracing::debug!(
            visit = *visit_num,
            vehicle = %vehicle.state.id,
            visited = %visited,
            time = now,
            next = %decision.task,
            arrival,
            "decision"
        );
        observer.on_decision(vehicle.state.id, &decision);

        vehicle.state.heading = path.arrival_heading;
        vehicle.trajectory = path.trajectory;
        let commitment = vehicle.routing.commit(decision.task, arrival, &mut databases[slot]);

        // ── Self-age ──────────────────────────────────────────────────────
        databases[slot].project_ages(tasks.as_slice(), now, arrival);

        // ── Disclose ──────────────────────────────────────────────────────
        let disclosure = Disclosure { vehicle: slot, visited, visit_time: now, commitment };
        vehicle.communication.disclose(&disclosure, databases);

        *visit_num += 1;
        *time = now;
        Ok(Some(slot))
    }

    /// Slot of the active vehicle with the earliest predicted arrival; the
    /// first such vehicle in slot order on ties.
    pub fn select_decider(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (slot, v) in self.vehicles.iter().enumerate() {
            if !v.is_active() {
                continue;
            }
            let arrival = v.routing.arrival_time;
            if best.is_none_or(|(_, b)| arrival < b) {
                best = Some((slot, arrival));
            }
        }
        best.map(|(slot, _)| slot)
    }

    /// Consume the sim and return its history.
    pub fn into_history(mut self) -> RunHistory {
        self.finish();
        self.history
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Order visits by time.  The sort is stable, so simultaneous visits
    /// keep processing order.
    fn finish(&mut self) {
        self.history.visits.sort_by(|a, b| a.time.total_cmp(&b.time));
    }
}
