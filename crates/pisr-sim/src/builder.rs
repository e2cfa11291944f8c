//! Fluent builder for constructing a [`Sim`].

use pisr_behavior::RoutingPolicy;
use pisr_core::SimConfig;
use pisr_fleet::{Database, TaskRegistry, TrackedFields, VehicleState};
use pisr_pathing::{impact_rating, PathingStrategy};

use crate::history::RunHistory;
use crate::vehicle::{Vehicle, VehicleSetup};
use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: visit and time budgets
/// - [`TaskRegistry`]: the fixed task set
/// - at least one [`VehicleSetup`], in slot order
///
/// # Optional inputs
///
/// | Method                      | Default |
/// |-----------------------------|---------|
/// | `.compute_impact_ratings(b)` | `false` |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::visits(100), tasks)
///     .vehicles(setups)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:         SimConfig,
    tasks:          TaskRegistry,
    vehicles:       Vec<VehicleSetup>,
    impact_ratings: bool,
}

impl SimBuilder {
    pub fn new(config: SimConfig, tasks: TaskRegistry) -> Self {
        Self { config, tasks, vehicles: Vec::new(), impact_ratings: false }
    }

    /// Append one vehicle.  Its `state.index` must equal its slot.
    pub fn vehicle(mut self, setup: VehicleSetup) -> Self {
        self.vehicles.push(setup);
        self
    }

    pub fn vehicles(mut self, setups: impl IntoIterator<Item = VehicleSetup>) -> Self {
        self.vehicles.extend(setups);
        self
    }

    /// Rate each constrained-pathing vehicle's no-fly map against the task
    /// layout during `build` (one solver call per ordered task pair).
    pub fn compute_impact_ratings(mut self, enabled: bool) -> Self {
        self.impact_ratings = enabled;
        self
    }

    /// Validate inputs, seed every database, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        if self.tasks.is_empty() {
            return Err(SimError::Config("at least one task is required".into()));
        }
        if self.vehicles.is_empty() {
            return Err(SimError::Config("at least one vehicle is required".into()));
        }

        // ── Validate each vehicle ─────────────────────────────────────────
        for (slot, setup) in self.vehicles.iter().enumerate() {
            validate(slot, setup, &self.tasks)?;
        }

        // ── Impact ratings ────────────────────────────────────────────────
        let mut impact_ratings = vec![None; self.vehicles.len()];
        if self.impact_ratings {
            for (rating, setup) in impact_ratings.iter_mut().zip(&self.vehicles) {
                if let PathingStrategy::Constrained(c) = &setup.pathing {
                    let r = impact_rating(c, &self.tasks)?;
                    tracing::info!(vehicle = %setup.state.id, impact_rating = r, "no-fly zone impact");
                    *rating = Some(r);
                }
            }
        }

        // ── Seed databases from true ages and start states ────────────────
        let states: Vec<VehicleState> = self.vehicles.iter().map(|v| v.state.clone()).collect();
        let databases: Vec<Database> = self
            .vehicles
            .iter()
            .enumerate()
            .map(|(slot, v)| Database::seed(slot, v.fields, &self.tasks, &states))
            .collect();

        for v in &self.vehicles {
            let norm_factor = match &v.routing {
                RoutingPolicy::Md2wrp(p) => Some(p.norm_factor),
                RoutingPolicy::Manual(_) => None,
            };
            tracing::info!(
                vehicle = %v.state.id,
                start = %v.state.location,
                speed = v.state.speed,
                turn_radius = v.state.turn_radius,
                routing = v.routing.name(),
                pathing = v.pathing.name(),
                communication = v.communication.name(),
                norm_factor = ?norm_factor,
                "vehicle configured"
            );
        }

        let vehicles: Vec<Vehicle> = self.vehicles.into_iter().map(Vehicle::from_setup).collect();

        Ok(Sim {
            config:    self.config,
            tasks:     self.tasks,
            vehicles,
            databases,
            history:   RunHistory::default(),
            impact_ratings,
            time:      0.0,
            visit_num: 1,
        })
    }
}

fn validate(slot: usize, setup: &VehicleSetup, tasks: &TaskRegistry) -> SimResult<()> {
    let state = &setup.state;
    if state.index != slot {
        return Err(SimError::VehicleIndexMismatch { slot, got: state.index });
    }
    tasks.require(state.location)?;

    match &setup.routing {
        RoutingPolicy::Md2wrp(p) => {
            if setup.fields != TrackedFields::ALL {
                return Err(SimError::Config(format!(
                    "{} uses MD2WRP routing, which needs both the age and vehicle trackers",
                    state.id
                )));
            }
            if p.weights.len() != tasks.len() {
                return Err(SimError::Config(format!(
                    "{} has {} MD2WRP weights for {} tasks",
                    state.id,
                    p.weights.len(),
                    tasks.len()
                )));
            }
        }
        RoutingPolicy::Manual(m) => {
            if m.sequence.is_empty() || m.cursor >= m.sequence.len() {
                return Err(SimError::Config(format!("{} has an unusable manual sequence", state.id)));
            }
            for &task in &m.sequence {
                tasks.require(task)?;
            }
        }
    }
    Ok(())
}
