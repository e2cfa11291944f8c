//! `pisr-behavior` — how vehicles decide and what they tell each other.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                   |
//! |-------------------|------------------------------------------------------------|
//! | [`routing`]       | `Routing`, `RoutingPolicy` (`Md2wrp`, `ManualSequence`), `Decision` |
//! | [`communication`] | `CommunicationStrategy`, `Disclosure`                      |
//! | [`error`]         | `BehaviorError`, `BehaviorResult<T>`                       |
//!
//! # Design notes
//!
//! Each engine iteration exercises these strategies in a fixed order for the
//! deciding vehicle only:
//!
//! 1. `Routing::select_next` reads the vehicle's own `Database` and asks the
//!    policy's distance measure for candidate travel times.
//! 2. The engine commits a physical path, then `Routing::commit` stores the
//!    new destination and arrival in routing state and the own database slot.
//! 3. `CommunicationStrategy::disclose` writes into peer databases.
//!
//! Strategies are closed enums chosen at construction time, so an unknown
//! strategy can only be a load-time error.

pub mod communication;
pub mod error;
pub mod routing;

#[cfg(test)]
mod tests;

pub use communication::{CommunicationStrategy, Disclosure};
pub use error::{BehaviorError, BehaviorResult};
pub use routing::{norm_factor, Decision, ManualSequence, Md2wrp, Routing, RoutingPolicy, UTILITY_SCALE};
