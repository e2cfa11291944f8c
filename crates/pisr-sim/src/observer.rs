//! Simulation observer trait for progress reporting and data collection.

use pisr_behavior::Decision;
use pisr_core::VehicleId;

use crate::history::{AgeSnapshot, RunHistory, VisitRecord};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] as the event loop
/// advances.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — visit counter
///
/// ```rust,ignore
/// struct VisitCounter(usize);
///
/// impl SimObserver for VisitCounter {
///     fn on_visit(&mut self, _visit: &VisitRecord) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before the first iteration.
    fn on_run_start(&mut self, _task_count: usize, _vehicle_count: usize) {}

    /// Called when a vehicle's arrival is materialised.
    fn on_visit(&mut self, _visit: &VisitRecord) {}

    /// Called for each pre- and post-visit age snapshot.
    fn on_age_snapshot(&mut self, _snapshot: &AgeSnapshot) {}

    /// Called after the deciding vehicle has chosen its next task.
    fn on_decision(&mut self, _vehicle: VehicleId, _decision: &Decision) {}

    /// Called once after the loop ends, with the time-ordered history.
    fn on_run_end(&mut self, _history: &RunHistory) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
