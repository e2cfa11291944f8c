//! `pisr-core` — foundational types for the `pisr` persistent-surveillance
//! fleet simulator.
//!
//! This crate is a dependency of every other `pisr-*` crate.  It has no
//! `pisr-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `TaskId` (1-based), `VehicleId`                         |
//! | [`geo`]       | `Point`, `Pose`, `mod2pi`, polyline length, turn radius |
//! | [`dubins`]    | Six-word Dubins solver, trajectory sampling             |
//! | [`time`]      | `SimConfig` run budget, activation-window arithmetic    |
//! | [`rng`]       | `SimRng` for seeded setup-time randomness               |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and `Point`.         |

pub mod dubins;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use dubins::{dubins_shortest, DubinsPath, DubinsWord};
pub use error::{CoreError, CoreResult};
pub use geo::{euclidean_distance, Point, Pose};
pub use ids::{TaskId, VehicleId};
pub use rng::SimRng;
pub use time::{active_span, SimConfig, POST_VISIT_OFFSET_SECS};
