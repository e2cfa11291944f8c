//! `pisr-scenario` — scenario files and one-call runs for the pisr fleet
//! simulator.
//!
//! A [`Scenario`] describes one trade: the task layout, per-task and
//! per-vehicle parameter vectors, and each vehicle's routing, pathing,
//! communication, and database choices.  [`Scenario::build`] validates it
//! into a ready [`Sim`](pisr_sim::Sim); [`run`] goes straight to the
//! [`RunHistory`](pisr_sim::RunHistory).
//!
//! # Modules
//!
//! | Module       | Contents                                             |
//! |--------------|------------------------------------------------------|
//! | `geometry`   | Named, explicit, and seeded-scatter task layouts     |
//! | `scenario`   | The serde description and its translation            |
//! | `loader`     | JSON file and reader loading                         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let scenario = pisr_scenario::load_scenario_json(Path::new("trade_1000.json"))?;
//! let history = pisr_scenario::run(&scenario)?;
//! ```

pub mod error;
pub mod geometry;
pub mod loader;
pub mod scenario;


pub use error::{ScenarioError, ScenarioResult};
pub use geometry::{named_layout, scatter, Geometry};
pub use loader::{load_scenario_json, load_scenario_reader};
pub use scenario::{
    run, run_with, DatabaseField, PathingSpec, RoutingSpec, Scenario, TaskVectors, VehicleVectors,
};
