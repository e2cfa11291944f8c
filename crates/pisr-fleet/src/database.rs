//! Per-vehicle peer-state database: the vehicle's private belief about task
//! ages and about every vehicle's committed destination.
//!
//! # Ownership
//!
//! Each vehicle owns exactly one `Database`.  The vehicle writes its own
//! commitment slot when it decides and its own age estimates when it
//! commits; peers write into it only through communication.  The engine
//! never touches it directly.  Entries for other vehicles are advisory and
//! may be stale between communications.

use pisr_core::TaskId;

use crate::{Task, TaskRegistry, VehicleState};

/// Which belief tables a vehicle maintains.
///
/// A field a vehicle does not track is still allocated (so slot indexing
/// stays uniform) but is never written by peers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedFields {
    pub age_tracker:     bool,
    pub vehicle_tracker: bool,
}

impl TrackedFields {
    pub const ALL: TrackedFields = TrackedFields { age_tracker: true, vehicle_tracker: true };
    pub const NONE: TrackedFields = TrackedFields { age_tracker: false, vehicle_tracker: false };
}

impl Default for TrackedFields {
    fn default() -> Self {
        Self::ALL
    }
}

/// A vehicle's committed destination and its predicted arrival there.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Commitment {
    pub destination:  TaskId,
    pub arrival_time: f64,
}

#[derive(Clone, Debug)]
pub struct Database {
    /// Slot of the owning vehicle.
    pub owner:           usize,
    pub fields:          TrackedFields,
    /// Estimated age per task, in task order.
    pub age_tracker:     Vec<f64>,
    /// Believed commitment per vehicle slot.
    pub vehicle_tracker: Vec<Commitment>,
}

impl Database {
    /// Seed a database for vehicle slot `owner`: ages from the true task
    /// ages, commitments from every vehicle's start task and activation time.
    pub fn seed(owner: usize, fields: TrackedFields, tasks: &TaskRegistry, vehicles: &[VehicleState]) -> Self {
        Self {
            owner,
            fields,
            age_tracker: tasks.ages(),
            vehicle_tracker: vehicles
                .iter()
                .map(|v| Commitment { destination: v.location, arrival_time: v.time })
                .collect(),
        }
    }

    /// The owner's own commitment.
    #[inline]
    pub fn own_commitment(&self) -> Commitment {
        self.vehicle_tracker[self.owner]
    }

    /// Record the owner's newest decision in its own slot.
    #[inline]
    pub fn record_own(&mut self, commitment: Commitment) {
        self.vehicle_tracker[self.owner] = commitment;
    }

    /// Commitments of every vehicle other than the owner, with their slots.
    pub fn peer_commitments(&self) -> impl Iterator<Item = (usize, &Commitment)> {
        self.vehicle_tracker.iter().enumerate().filter(move |(slot, _)| *slot != self.owner)
    }

    /// Clear the estimate for a task the owner has just serviced.
    #[inline]
    pub fn clear_age(&mut self, task: TaskId) {
        self.age_tracker[task.index()] = 0.0;
    }

    /// Project every age estimate forward from `from` to `to` under each
    /// task's activation window.  Used when the owner commits to a trip that
    /// ends at `to`.
    pub fn project_ages(&mut self, tasks: &[Task], from: f64, to: f64) {
        for (estimate, task) in self.age_tracker.iter_mut().zip(tasks) {
            *estimate = task.projected_age(*estimate, from, to);
        }
    }

    // ── Peer writes ───────────────────────────────────────────────────────

    /// Overwrite the age estimate for `task`, if ages are tracked.
    #[inline]
    pub fn observe_age(&mut self, task: TaskId, age: f64) {
        if self.fields.age_tracker {
            self.age_tracker[task.index()] = age;
        }
    }

    /// Overwrite the commitment believed for vehicle `slot`, if commitments
    /// are tracked.
    #[inline]
    pub fn observe_commitment(&mut self, slot: usize, commitment: Commitment) {
        if self.fields.vehicle_tracker {
            self.vehicle_tracker[slot] = commitment;
        }
    }
}
