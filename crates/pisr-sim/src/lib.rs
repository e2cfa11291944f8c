//! `pisr-sim` — event-driven loop for the pisr fleet simulator.
//!
//! # Event loop
//!
//! ```text
//! while visit_num ≤ max_visits and time ≤ max_time_secs:
//!   ① Decider   — active vehicle with the earliest predicted arrival
//!   ② Arrive    — location ← destination, clock ← arrival time
//!   ③ Age       — accrue all task ages, snapshot, reset visited, snapshot
//!   ④ Record    — (vehicle, task, time, trajectory)
//!   ⑤ Decide    — Routing::select_next, then PathingStrategy::commit
//!   ⑥ Self-age  — project own age estimates to the new arrival
//!   ⑦ Disclose  — CommunicationStrategy::disclose into peer databases
//! ```
//!
//! The loop is single-threaded and fully deterministic: ties go to the
//! lowest vehicle slot and, inside routing, to the lowest task index.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs setup-time impact-rating solver calls on Rayon.   |
//! | `serde`    | Derives `Serialize`/`Deserialize` on the run history.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pisr_core::SimConfig;
//! use pisr_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::visits(500), tasks)
//!     .vehicles(setups)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! let history = sim.into_history();
//! ```

pub mod builder;
pub mod error;
pub mod history;
pub mod observer;
pub mod sim;
pub mod vehicle;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use history::{AgeSnapshot, RunHistory, SnapshotPhase, VisitRecord};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use vehicle::{Vehicle, VehicleSetup};
