//! Pathing strategies: candidate travel times for routing decisions and the
//! committed trajectory to a chosen destination.
//!
//! | Variant         | Candidate time                   | Arrival heading        |
//! |-----------------|----------------------------------|------------------------|
//! | `Euclidean`     | straight-line distance / speed   | 0                      |
//! | `Dubins`        | shortest over a heading grid     | the minimising heading |
//! | `Constrained`   | external solver polyline / speed | 0                      |
//!
//! Strategies never mutate vehicles or tasks.  The engine applies a
//! [`CommittedPath`] to the vehicle (heading, predicted arrival).

use std::fmt;
use std::sync::Arc;

use pisr_core::dubins::{self, heading_grid, shortest_length, HEADING_EPSILON, SAMPLE_STEPS};
use pisr_core::geo::polyline_length;
use pisr_core::{Point, Pose, TaskId};
use pisr_fleet::{Task, VehicleState};

use crate::solver::PathSolver;
use crate::{PathingError, PathingResult};

/// Default number of discrete arrival headings searched by Dubins pathing.
pub const DEFAULT_HEADING_STEPS: usize = 16;

// ── Result types ──────────────────────────────────────────────────────────────

/// Travel estimate from a vehicle's current pose to one task.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    pub task:    TaskId,
    /// Seconds.
    pub time:    f64,
    /// Arrival heading that achieves `time` (0 when heading is not modelled).
    pub heading: f64,
}

/// The path a vehicle commits to after a routing decision.
#[derive(Clone, Debug, PartialEq)]
pub struct CommittedPath {
    /// Metres.
    pub length:          f64,
    pub trajectory:      Vec<Point>,
    /// Heading the vehicle will have on arrival.
    pub arrival_heading: f64,
}

// ── PathingStrategy ───────────────────────────────────────────────────────────

/// Obstacle-constrained pathing parameters.
#[derive(Clone)]
pub struct ConstrainedPathing {
    pub solver:  Arc<dyn PathSolver>,
    pub map_id:  String,
    pub zone_id: String,
}

impl fmt::Debug for ConstrainedPathing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstrainedPathing")
            .field("map_id", &self.map_id)
            .field("zone_id", &self.zone_id)
            .finish_non_exhaustive()
    }
}

impl ConstrainedPathing {
    fn route(&self, from: Point, to: Point) -> PathingResult<Vec<Point>> {
        let points = self.solver.solve(from, to, &self.map_id, &self.zone_id)?;
        if points.is_empty() {
            return Err(PathingError::EmptyPath { from, to });
        }
        Ok(points)
    }
}

#[derive(Clone, Debug)]
pub enum PathingStrategy {
    Euclidean,
    Dubins { heading_steps: usize },
    Constrained(ConstrainedPathing),
}

impl PathingStrategy {
    /// Dubins pathing over the default 16-heading grid.
    pub fn dubins() -> Self {
        PathingStrategy::Dubins { heading_steps: DEFAULT_HEADING_STEPS }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PathingStrategy::Euclidean => "Euclidean",
            PathingStrategy::Dubins { .. } => "Dubins",
            PathingStrategy::Constrained(_) => "Tripath",
        }
    }

    /// `true` if candidate headings are meaningful for this strategy.
    #[inline]
    pub fn models_heading(&self) -> bool {
        matches!(self, PathingStrategy::Dubins { .. })
    }

    /// Travel time and arrival heading from the vehicle's current location
    /// and heading to every task, in task order.
    pub fn candidate_times(&self, vehicle: &VehicleState, tasks: &[Task]) -> PathingResult<Vec<Candidate>> {
        let origin = position(tasks, vehicle.location)?;
        tasks
            .iter()
            .map(|task| {
                let (length, heading) = match self {
                    PathingStrategy::Euclidean => (origin.distance(task.position), 0.0),
                    PathingStrategy::Dubins { heading_steps } => best_heading(
                        vehicle,
                        origin,
                        task.id == vehicle.location,
                        task.position,
                        *heading_steps,
                    )?,
                    PathingStrategy::Constrained(c) => {
                        if task.id == vehicle.location {
                            (0.0, 0.0)
                        } else {
                            (polyline_length(&c.route(origin, task.position)?), 0.0)
                        }
                    }
                };
                Ok(Candidate { task: task.id, time: vehicle.travel_time(length), heading })
            })
            .collect()
    }

    /// Path from the vehicle's current location to `destination`.
    ///
    /// For Dubins pathing `heading_hint` is the arrival heading chosen by the
    /// routing decision; without one the heading grid is searched here.
    /// Other strategies ignore the hint and arrive with heading 0.
    pub fn commit(
        &self,
        vehicle:      &VehicleState,
        destination:  TaskId,
        heading_hint: Option<f64>,
        tasks:        &[Task],
    ) -> PathingResult<CommittedPath> {
        let origin = position(tasks, vehicle.location)?;
        let goal = position(tasks, destination)?;
        let same_task = destination == vehicle.location;

        match self {
            PathingStrategy::Euclidean => Ok(CommittedPath {
                length:          origin.distance(goal),
                trajectory:      vec![origin, goal],
                arrival_heading: 0.0,
            }),
            PathingStrategy::Dubins { heading_steps } => {
                let heading = match heading_hint {
                    Some(h) => perturb(vehicle.heading, same_task, h),
                    None => best_heading(vehicle, origin, same_task, goal, *heading_steps)?.1,
                };
                let path = dubins::shortest_path(
                    Pose::new(origin, vehicle.heading),
                    Pose::new(goal, heading),
                    vehicle.turn_radius,
                )?;
                Ok(CommittedPath {
                    length:          path.length(),
                    trajectory:      path.sample(SAMPLE_STEPS),
                    arrival_heading: heading,
                })
            }
            PathingStrategy::Constrained(c) => {
                let trajectory = if same_task { vec![origin] } else { c.route(origin, goal)? };
                Ok(CommittedPath {
                    length: polyline_length(&trajectory),
                    trajectory,
                    arrival_heading: 0.0,
                })
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn position(tasks: &[Task], id: TaskId) -> PathingResult<Point> {
    if id.0 == 0 {
        return Err(PathingError::UnknownTask(id));
    }
    tasks.get(id.index()).map(|t| t.position).ok_or(PathingError::UnknownTask(id))
}

/// Nudge a candidate arrival heading that would make a zero-length path back
/// to the vehicle's own location.
#[inline]
fn perturb(current: f64, same_task: bool, candidate: f64) -> f64 {
    if same_task && candidate == current { current + HEADING_EPSILON } else { candidate }
}

/// Shortest Dubins length over the heading grid and the heading achieving
/// it.  The first minimum in grid order wins.
fn best_heading(
    vehicle:   &VehicleState,
    origin:    Point,
    same_task: bool,
    goal:      Point,
    steps:     usize,
) -> PathingResult<(f64, f64)> {
    let mut best: Option<(f64, f64)> = None;
    for theta in heading_grid(steps) {
        let theta = perturb(vehicle.heading, same_task, theta);
        let length = shortest_length(origin, vehicle.heading, goal, theta, vehicle.turn_radius)?;
        if best.is_none_or(|(l, _)| length < l) {
            best = Some((length, theta));
        }
    }
    // Empty only when `steps` is zero.
    best.ok_or(PathingError::Core(pisr_core::CoreError::NoDubinsPath))
}
