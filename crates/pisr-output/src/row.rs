//! Plain data row types written by output backends.

use pisr_core::Point;
use pisr_sim::{AgeSnapshot, VisitRecord};

/// One task visit.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitRow {
    pub vehicle_id: u32,
    pub task_id:    u32,
    pub time:       f64,
    /// Trajectory that led to the visit as `x,y` pairs joined by `;`.
    /// Empty for a vehicle's first visit.
    pub waypoints:  String,
}

impl From<&VisitRecord> for VisitRow {
    fn from(v: &VisitRecord) -> Self {
        Self {
            vehicle_id: v.vehicle_id.0,
            task_id:    v.task_id.0,
            time:       v.time,
            waypoints:  encode_waypoints(&v.trajectory),
        }
    }
}

/// True task ages at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeRow {
    pub time:  f64,
    /// `"pre"` or `"post"`.
    pub phase: &'static str,
    /// Age of each task, task 1 first.
    pub ages:  Vec<f64>,
}

impl From<&AgeSnapshot> for AgeRow {
    fn from(s: &AgeSnapshot) -> Self {
        Self { time: s.time, phase: s.phase.as_str(), ages: s.ages.clone() }
    }
}

pub fn encode_waypoints(points: &[Point]) -> String {
    points.iter().map(|p| format!("{},{}", p.x, p.y)).collect::<Vec<_>>().join(";")
}
