//! `pisr-pathing` — travel-time models and external path solving.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`strategy`]   | `PathingStrategy` (Euclidean / Dubins / Constrained), `Candidate`, `CommittedPath` |
//! | [`solver`]     | `PathSolver` trait, `CommandSolver`, solver output parsing      |
//! | [`impact`]     | `impact_rating` for obstacle maps                               |
//! | [`error`]      | `PathingError`, `PathingResult<T>`                              |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                       |
//! |------------|--------------------------------------------------------------|
//! | `parallel` | Runs impact-rating solver calls on Rayon.                    |

pub mod error;
pub mod impact;
pub mod solver;
pub mod strategy;


pub use error::{PathingError, PathingResult};
pub use impact::impact_rating;
pub use solver::{CommandSolver, PathSolver};
pub use strategy::{Candidate, CommittedPath, ConstrainedPathing, PathingStrategy, DEFAULT_HEADING_STEPS};
