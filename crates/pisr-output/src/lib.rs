//! `pisr-output` — run output writers and latency summaries for the pisr
//! fleet simulator.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                  |
//! |-----------|---------|--------------------------------|
//! | *(none)*  | CSV     | `visits.csv`, `task_ages.csv`  |
//! | `sqlite`  | SQLite  | `output.db`                    |
//!
//! Both implement [`OutputWriter`] and are driven by [`HistoryObserver`],
//! which implements `pisr_sim::SimObserver`.  [`LatencySummary`] reduces a
//! finished run's age snapshots to `L̄`, `L_max`, and per-task maxima.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pisr_output::{CsvWriter, HistoryObserver, LatencySummary};
//!
//! let writer = CsvWriter::new(Path::new("./output"), sim.tasks.len())?;
//! let mut obs = HistoryObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! let summary = LatencySummary::from_history(&sim.history.ages, &sim.tasks.priorities());
//! ```

pub mod csv;
pub mod error;
pub mod latency;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use latency::{weighted_latency, LatencySummary};
pub use observer::HistoryObserver;
pub use row::{encode_waypoints, AgeRow, VisitRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
