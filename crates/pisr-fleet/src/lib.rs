//! `pisr-fleet` — tasks, vehicles, and per-vehicle belief state.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`task`]      | `Task`, `TaskRegistry` (true ages, activation windows)         |
//! | [`vehicle`]   | `VehicleState` (speed, turn radius, heading, clock, location)  |
//! | [`database`]  | `Database`, `Commitment`, `TrackedFields`                      |
//! | [`error`]     | `FleetError`, `FleetResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on tasks, vehicle state, commitments. |

pub mod database;
pub mod error;
pub mod task;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use database::{Commitment, Database, TrackedFields};
pub use error::{FleetError, FleetResult};
pub use task::{Task, TaskRegistry};
pub use vehicle::VehicleState;
