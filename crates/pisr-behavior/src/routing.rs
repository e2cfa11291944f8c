//! Routing strategies: how a vehicle chooses its next task.
//!
//! # MD2WRP utility
//!
//! For every task `j`, with candidate travel time `t_ij` from the policy's
//! distance measure and the vehicle's own belief `age_j`:
//!
//! ```text
//! U_j = exp(-β · t_ij / nf) · w_j · (age_j + t_ij − mod_j) / nf · 1e5
//! ```
//!
//! `mod_j` accounts for peers believed to be heading to `j`:
//!
//! | Peer arrival vs. own arrival `t + t_ij` | `mod_j`                                    |
//! |-----------------------------------------|--------------------------------------------|
//! | before, residual < `age_j + t_ij`       | `age_j + t_ij − residual` (age → residual) |
//! | before, residual ≥ `age_j + t_ij`       | 0                                          |
//! | at or after                             | `age_j + t_ij` (utility → 0, conflict)     |
//!
//! where `residual = own arrival − peer arrival`.  When several peers target
//! the same task the last one in slot order decides `mod_j`.  Tasks outside
//! their active window at the vehicle's current time have `U_j = 0`.  The
//! first maximum in task order wins, including when every utility is 0.

use pisr_core::TaskId;
use pisr_fleet::{Commitment, Database, Task, TaskRegistry, VehicleState};
use pisr_pathing::{Candidate, PathingStrategy};

use crate::{BehaviorError, BehaviorResult};

/// Readability scale applied to every MD2WRP utility.
pub const UTILITY_SCALE: f64 = 1e5;

// ── Decision ──────────────────────────────────────────────────────────────────

/// Outcome of one routing decision.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub task:      TaskId,
    /// Arrival heading chosen alongside the task, when the decision's distance
    /// measure models heading.
    pub heading:   Option<f64>,
    /// Per-task utilities (empty for policies that do not score tasks).
    pub utilities: Vec<f64>,
}

// ── MD2WRP ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Md2wrp {
    /// Distance discount.
    pub beta:        f64,
    /// Per-task weight, in task order.
    pub weights:     Vec<f64>,
    /// Pathing model used for candidate scoring only.
    pub measure:     PathingStrategy,
    /// Longest inter-task distance divided by vehicle speed.
    pub norm_factor: f64,
}

impl Md2wrp {
    /// Build the policy for a vehicle travelling at `speed`.
    ///
    /// # Errors
    ///
    /// [`BehaviorError::Config`] if `weights` does not have one entry per
    /// task or `beta` is not finite.
    pub fn new(
        beta:    f64,
        weights: Vec<f64>,
        measure: PathingStrategy,
        tasks:   &TaskRegistry,
        speed:   f64,
    ) -> BehaviorResult<Self> {
        if weights.len() != tasks.len() {
            return Err(BehaviorError::Config(format!(
                "MD2WRP needs {} weights, got {}",
                tasks.len(),
                weights.len()
            )));
        }
        if !beta.is_finite() {
            return Err(BehaviorError::Config(format!("MD2WRP beta {beta} is not finite")));
        }
        Ok(Self { beta, weights, measure, norm_factor: norm_factor(tasks, speed) })
    }

    /// Conflict/interim-visit adjustment for task `j`.
    fn age_modifier(db: &Database, task: TaskId, age: f64, own_arrival: f64, tij: f64) -> f64 {
        let mut modifier = 0.0;
        for (slot, peer) in db.peer_commitments() {
            if peer.destination != task {
                continue;
            }
            if peer.arrival_time < own_arrival {
                let residual = own_arrival - peer.arrival_time;
                modifier = if residual < age + tij {
                    tracing::trace!(%task, peer = slot, residual, "interim visit lowers effective age");
                    age + tij - residual
                } else {
                    0.0
                };
            } else {
                tracing::trace!(%task, peer = slot, "conflict zeroes utility");
                modifier = age + tij;
            }
        }
        modifier
    }

    /// Utility of every task for `vehicle`, given its candidate travel times.
    pub fn utilities(&self, vehicle: &VehicleState, db: &Database, tasks: &[Task], candidates: &[Candidate]) -> Vec<f64> {
        candidates
            .iter()
            .zip(tasks)
            .map(|(c, task)| {
                if !task.is_active_at(vehicle.time) {
                    tracing::trace!(task = %task.id, time = vehicle.time, "inactive task zeroed");
                    return 0.0;
                }
                let j = task.id.index();
                let tij = c.time;
                let age = db.age_tracker[j];
                let modifier = Self::age_modifier(db, task.id, age, vehicle.time + tij, tij);
                let discount = (-self.beta * tij / self.norm_factor).exp();
                let utility = discount * self.weights[j] * ((age + tij - modifier) / self.norm_factor) * UTILITY_SCALE;
                tracing::trace!(task = %task.id, tij, age, modifier, utility);
                utility
            })
            .collect()
    }

    fn select(&self, vehicle: &VehicleState, db: &Database, tasks: &[Task]) -> BehaviorResult<Decision> {
        let candidates = self.measure.candidate_times(vehicle, tasks)?;
        let utilities = self.utilities(vehicle, db, tasks, &candidates);

        let mut best: Option<(usize, f64)> = None;
        for (i, &u) in utilities.iter().enumerate() {
            if best.is_none_or(|(_, b)| u > b) {
                best = Some((i, u));
            }
        }
        let (index, max_utility) = best.ok_or_else(|| BehaviorError::Config("MD2WRP with no tasks".into()))?;
        if max_utility == 0.0 {
            tracing::debug!(
                vehicle = %vehicle.id,
                "every utility is zero; falling back to the first task"
            );
        }

        let heading = self.measure.models_heading().then(|| candidates[index].heading);
        Ok(Decision { task: TaskId::from_index(index), heading, utilities })
    }
}

/// Longest pairwise straight-line task distance over `speed`; 1.0 when
/// every task sits at the same point.
pub fn norm_factor(tasks: &TaskRegistry, speed: f64) -> f64 {
    let longest = tasks.max_pairwise_distance();
    if longest > 0.0 { longest / speed } else { 1.0 }
}

// ── Manual ────────────────────────────────────────────────────────────────────

/// Fixed cyclic task sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct ManualSequence {
    pub sequence: Vec<TaskId>,
    /// Index of the sequence entry most recently committed to.
    pub cursor:   usize,
}

impl ManualSequence {
    pub fn new(sequence: Vec<TaskId>, cursor: usize, tasks: &TaskRegistry) -> BehaviorResult<Self> {
        if sequence.is_empty() {
            return Err(BehaviorError::EmptySequence);
        }
        if let Some(&missing) = sequence.iter().find(|&&t| !tasks.contains(t)) {
            return Err(BehaviorError::UnknownTask(missing));
        }
        if cursor >= sequence.len() {
            return Err(BehaviorError::Config(format!(
                "manual sequence start index {cursor} is past the end of a {}-entry sequence",
                sequence.len()
            )));
        }
        Ok(Self { sequence, cursor })
    }

    fn advance(&mut self) -> TaskId {
        self.cursor = (self.cursor + 1) % self.sequence.len();
        self.sequence[self.cursor]
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub enum RoutingPolicy {
    Md2wrp(Md2wrp),
    Manual(ManualSequence),
}

impl RoutingPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            RoutingPolicy::Md2wrp(_) => "MD2WRP",
            RoutingPolicy::Manual(_) => "Manual",
        }
    }
}

/// A vehicle's routing state: the current commitment plus the policy that
/// produces the next one.
#[derive(Clone, Debug)]
pub struct Routing {
    pub destination:  TaskId,
    pub arrival_time: f64,
    pub policy:       RoutingPolicy,
}

impl Routing {
    /// Start committed to the vehicle's own location at its activation time.
    pub fn new(policy: RoutingPolicy, vehicle: &VehicleState) -> Self {
        Self { destination: vehicle.location, arrival_time: vehicle.time, policy }
    }

    /// Choose the next task.  Does not change the commitment; see
    /// [`commit`](Self::commit).
    pub fn select_next(&mut self, vehicle: &VehicleState, db: &Database, tasks: &[Task]) -> BehaviorResult<Decision> {
        match &mut self.policy {
            RoutingPolicy::Md2wrp(p) => p.select(vehicle, db, tasks),
            RoutingPolicy::Manual(m) => Ok(Decision { task: m.advance(), heading: None, utilities: Vec::new() }),
        }
    }

    /// Record a new commitment here and in the owner's slot of `db`.
    pub fn commit(&mut self, destination: TaskId, arrival_time: f64, db: &mut Database) -> Commitment {
        self.destination = destination;
        self.arrival_time = arrival_time;
        let commitment = Commitment { destination, arrival_time };
        db.record_own(commitment);
        commitment
    }
}
