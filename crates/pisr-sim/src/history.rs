//! Run output: visit records and task-age snapshots.

use pisr_core::{Point, TaskId, VehicleId};

/// One task visit: who arrived where, when, and along which path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitRecord {
    pub vehicle_id: VehicleId,
    pub task_id:    TaskId,
    pub time:       f64,
    /// Path flown to reach the task (empty for a vehicle's first arrival).
    pub trajectory: Vec<Point>,
}

/// Whether a snapshot was taken before or after the visited task's reset.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapshotPhase {
    PreVisit,
    PostVisit,
}

impl SnapshotPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            SnapshotPhase::PreVisit => "pre",
            SnapshotPhase::PostVisit => "post",
        }
    }
}

/// True age of every task at one instant, in task order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgeSnapshot {
    pub time:  f64,
    pub phase: SnapshotPhase,
    pub ages:  Vec<f64>,
}

/// Everything a run produces.  Enough to reconstruct any latency metric
/// without re-running.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunHistory {
    /// Ordered by visit time once the run has finished.
    pub visits: Vec<VisitRecord>,
    /// Two snapshots per visit, in the order taken.
    pub ages:   Vec<AgeSnapshot>,
}
