//! Scenario description and its translation into a ready [`Sim`].
//!
//! Per-task and per-vehicle parameters are parallel vectors.  A vector needs
//! at least one entry per task (or vehicle); extra entries are ignored, so
//! one long vector can serve several layouts.  An omitted vector takes its
//! default where one exists:
//!
//! | Vector                         | Default          |
//! |--------------------------------|------------------|
//! | `tasks.priorities`             | 1                |
//! | `tasks.initial_ages`           | 0                |
//! | `tasks.activation_times`       | 0                |
//! | `tasks.termination_times`      | never (`null`)   |
//! | `vehicles.ids`                 | 100, 200, …      |
//! | `vehicles.headings_deg`        | 0                |
//! | `vehicles.speeds`              | required         |
//! | `vehicles.bank_angles_deg`     | 90               |
//! | `vehicles.activation_times`    | 0                |
//! | `vehicles.termination_times`   | never (`null`)   |
//! | `routing`, `pathing`           | required         |
//! | `communication`                | `None`           |
//! | `database`                     | both trackers    |
//!
//! `vehicles.start_tasks` (1-based task ids) fixes the number of vehicles.
//! `max_visits` is required; `max_time_secs` is optional.  Legs between
//! co-located tasks take no time, so only a visit count is sure to end a run.
//! JSON has no infinity, so open-ended times are written as `null`.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use pisr_behavior::{CommunicationStrategy, ManualSequence, Md2wrp, RoutingPolicy};
use pisr_core::{SimConfig, TaskId, VehicleId};
use pisr_fleet::{Task, TaskRegistry, TrackedFields, VehicleState};
use pisr_pathing::{CommandSolver, ConstrainedPathing, PathingStrategy, DEFAULT_HEADING_STEPS};
use pisr_sim::{NoopObserver, RunHistory, Sim, SimBuilder, SimObserver, VehicleSetup};

use crate::geometry::Geometry;
use crate::{ScenarioError, ScenarioResult};

// ── Description ───────────────────────────────────────────────────────────────

/// One simulation trade.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub trade_id:       u32,
    /// Visit budget.  Must be set before [`Scenario::build`]; optional in
    /// the file only so a command line can supply it.
    #[serde(default)]
    pub max_visits:     Option<u64>,
    /// Simulated-time budget in seconds; unbounded when absent.
    #[serde(default)]
    pub max_time_secs:  Option<f64>,
    /// Rate each Tripath vehicle's no-fly map during setup.
    #[serde(default)]
    pub impact_ratings: bool,
    pub geometry:       Geometry,
    #[serde(default)]
    pub tasks:          TaskVectors,
    pub vehicles:       VehicleVectors,
    pub routing:        Vec<RoutingSpec>,
    pub pathing:        Vec<PathingSpec>,
    #[serde(default)]
    pub communication:  Vec<CommunicationStrategy>,
    #[serde(default)]
    pub database:       Vec<Vec<DatabaseField>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskVectors {
    pub priorities:        Vec<f64>,
    pub initial_ages:      Vec<f64>,
    pub activation_times:  Vec<f64>,
    pub termination_times: Vec<Option<f64>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleVectors {
    pub ids:               Vec<u32>,
    pub start_tasks:       Vec<u32>,
    pub headings_deg:      Vec<f64>,
    pub speeds:            Vec<f64>,
    pub bank_angles_deg:   Vec<f64>,
    pub activation_times:  Vec<f64>,
    pub termination_times: Vec<Option<f64>>,
}

/// How a vehicle picks its next task.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RoutingSpec {
    #[serde(rename = "MD2WRP")]
    Md2wrp {
        beta:    f64,
        /// One weight per task; extra entries are ignored.
        weights: Vec<f64>,
        /// Travel-time model used to score candidates.
        measure: PathingSpec,
    },
    Manual {
        /// Cyclic tour of 1-based task ids.
        tour:        Vec<u32>,
        /// Position in `tour` of the vehicle's start task.
        start_index: usize,
    },
}

/// How a vehicle travels between tasks.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PathingSpec {
    Euclidean,
    Dubins {
        #[serde(default = "default_heading_steps")]
        heading_steps: usize,
    },
    /// Obstacle-avoiding paths from an external solver program.
    Tripath {
        program: PathBuf,
        /// Arguments placed before the query arguments.
        #[serde(default)]
        args:    Vec<String>,
        map_id:  String,
        zone_id: String,
    },
}

fn default_heading_steps() -> usize {
    DEFAULT_HEADING_STEPS
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseField {
    AgeTracker,
    VehicleTracker,
}

// ── Translation ───────────────────────────────────────────────────────────────

impl Scenario {
    /// The run budget.  Fails when `max_visits` is missing.
    pub fn config(&self) -> ScenarioResult<SimConfig> {
        let max_visits = self
            .max_visits
            .ok_or_else(|| ScenarioError::Config("max_visits is required".into()))?;
        Ok(SimConfig {
            trade_id: self.trade_id,
            max_visits,
            max_time_secs: self.max_time_secs.unwrap_or(f64::INFINITY),
        })
    }

    /// Resolve the geometry and task vectors into a registry.
    pub fn task_registry(&self) -> ScenarioResult<TaskRegistry> {
        let positions = self.geometry.positions()?;
        let n = positions.len();
        let v = &self.tasks;
        let priorities = take("tasks.priorities", &v.priorities, n, Some(1.0))?;
        let ages = take("tasks.initial_ages", &v.initial_ages, n, Some(0.0))?;
        let activation = take("tasks.activation_times", &v.activation_times, n, Some(0.0))?;
        let termination = take("tasks.termination_times", &v.termination_times, n, Some(None))?;

        let tasks = positions
            .into_iter()
            .enumerate()
            .map(|(i, position)| Task {
                id: TaskId::from_index(i),
                position,
                priority: priorities[i],
                age: ages[i],
                activation_time: activation[i],
                termination_time: termination[i].unwrap_or(f64::INFINITY),
            })
            .collect();
        Ok(TaskRegistry::new(tasks)?)
    }

    /// One [`VehicleSetup`] per start task, in slot order.
    pub fn vehicle_setups(&self, tasks: &TaskRegistry) -> ScenarioResult<Vec<VehicleSetup>> {
        let v = &self.vehicles;
        let m = v.start_tasks.len();
        if m == 0 {
            return Err(ScenarioError::Config("vehicles.start_tasks is empty".into()));
        }

        let ids = if v.ids.is_empty() {
            (1..=m as u32).map(|k| k * 100).collect()
        } else {
            take("vehicles.ids", &v.ids, m, None)?
        };
        let headings = take("vehicles.headings_deg", &v.headings_deg, m, Some(0.0))?;
        let speeds = take("vehicles.speeds", &v.speeds, m, None)?;
        let banks = take("vehicles.bank_angles_deg", &v.bank_angles_deg, m, Some(90.0))?;
        let activation = take("vehicles.activation_times", &v.activation_times, m, Some(0.0))?;
        let termination = take("vehicles.termination_times", &v.termination_times, m, Some(None))?;
        let routing = take("routing", &self.routing, m, None)?;
        let pathing = take("pathing", &self.pathing, m, None)?;
        let communication = take("communication", &self.communication, m, Some(CommunicationStrategy::None))?;
        let database = take("database", &self.database, m, Some(vec![DatabaseField::AgeTracker, DatabaseField::VehicleTracker]))?;

        let mut setups = Vec::with_capacity(m);
        for i in 0..m {
            let state = VehicleState::new(
                VehicleId(ids[i]),
                i,
                TaskId(v.start_tasks[i]),
                headings[i].to_radians(),
                speeds[i],
                banks[i].to_radians(),
                activation[i],
                termination[i].unwrap_or(f64::INFINITY),
            )?;
            let policy = routing[i].policy(tasks, &state)?;
            setups.push(VehicleSetup {
                routing: policy,
                pathing: pathing[i].strategy()?,
                communication: communication[i],
                fields: tracked_fields(&database[i]),
                state,
            });
        }
        Ok(setups)
    }

    /// Validate everything and return a ready-to-run [`Sim`].
    pub fn build(&self) -> ScenarioResult<Sim> {
        let config = self.config()?;
        let tasks = self.task_registry()?;
        let setups = self.vehicle_setups(&tasks)?;
        tracing::info!(
            trade = self.trade_id,
            geometry = ?self.geometry,
            tasks = tasks.len(),
            vehicles = setups.len(),
            "scenario resolved"
        );
        let sim = SimBuilder::new(config, tasks)
            .vehicles(setups)
            .compute_impact_ratings(self.impact_ratings)
            .build()?;
        Ok(sim)
    }
}

impl RoutingSpec {
    fn policy(&self, tasks: &TaskRegistry, vehicle: &VehicleState) -> ScenarioResult<RoutingPolicy> {
        match self {
            RoutingSpec::Md2wrp { beta, weights, measure } => {
                let weights = take("routing.weights", weights, tasks.len(), None)?;
                let policy = Md2wrp::new(*beta, weights, measure.strategy()?, tasks, vehicle.speed)?;
                Ok(RoutingPolicy::Md2wrp(policy))
            }
            RoutingSpec::Manual { tour, start_index } => {
                let sequence: Vec<TaskId> = tour.iter().map(|&t| TaskId(t)).collect();
                let manual = ManualSequence::new(sequence, *start_index, tasks)?;
                let start = manual.sequence[manual.cursor];
                if start != vehicle.location {
                    return Err(ScenarioError::Config(format!(
                        "{} starts at {} but its tour starts at {start}",
                        vehicle.id, vehicle.location
                    )));
                }
                Ok(RoutingPolicy::Manual(manual))
            }
        }
    }
}

impl PathingSpec {
    pub fn strategy(&self) -> ScenarioResult<PathingStrategy> {
        let strategy = match self {
            PathingSpec::Euclidean => PathingStrategy::Euclidean,
            PathingSpec::Dubins { heading_steps: 0 } => {
                return Err(ScenarioError::Config("Dubins heading_steps must be at least 1".into()));
            }
            PathingSpec::Dubins { heading_steps } => PathingStrategy::Dubins { heading_steps: *heading_steps },
            PathingSpec::Tripath { program, args, map_id, zone_id } => {
                let solver = CommandSolver::new(program.clone()).with_args(args.iter().cloned());
                PathingStrategy::Constrained(ConstrainedPathing {
                    solver:  Arc::new(solver),
                    map_id:  map_id.clone(),
                    zone_id: zone_id.clone(),
                })
            }
        };
        Ok(strategy)
    }
}

fn tracked_fields(fields: &[DatabaseField]) -> TrackedFields {
    TrackedFields {
        age_tracker:     fields.contains(&DatabaseField::AgeTracker),
        vehicle_tracker: fields.contains(&DatabaseField::VehicleTracker),
    }
}

/// The first `needed` entries of `values`, or `default` repeated when the
/// vector was omitted.
fn take<T: Clone>(field: &'static str, values: &[T], needed: usize, default: Option<T>) -> ScenarioResult<Vec<T>> {
    match default {
        Some(d) if values.is_empty() => Ok(vec![d; needed]),
        _ if values.len() < needed => Err(ScenarioError::ShortVector { field, needed, got: values.len() }),
        _ => Ok(values[..needed].to_vec()),
    }
}

// ── One-call runs ─────────────────────────────────────────────────────────────

/// Build and run `scenario`, returning the visit and age history.
pub fn run(scenario: &Scenario) -> ScenarioResult<RunHistory> {
    run_with(scenario, &mut NoopObserver)
}

/// Like [`run`] but reports progress to `observer`.
pub fn run_with<O: SimObserver>(scenario: &Scenario, observer: &mut O) -> ScenarioResult<RunHistory> {
    let mut sim = scenario.build()?;
    sim.run(observer)?;
    Ok(sim.into_history())
}
