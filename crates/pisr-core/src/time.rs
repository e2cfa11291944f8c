//! Run budget and continuous simulation time.
//!
//! # Design
//!
//! Time is a continuous `f64` count of seconds since the start of the run.
//! The engine is event-driven: the clock jumps straight to the next vehicle
//! arrival, so there is no tick resolution to configure.  A run stops at
//! whichever of the two budgets trips first:
//!
//! ```text
//! continue while visit_num ≤ max_visits  and  time ≤ max_time_secs
//! ```

/// Offset (seconds) between the pre-visit and post-visit age snapshots taken
/// at every arrival.  Downstream latency analysis relies on seeing the age
/// discontinuity at a visit as two distinct timestamps.
pub const POST_VISIT_OFFSET_SECS: f64 = 0.01;

/// Top-level run configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Trade identifier carried through to output file names and logs.
    pub trade_id: u32,

    /// Maximum number of task visits to simulate.  `u64::MAX` = unbounded.
    pub max_visits: u64,

    /// Maximum simulated time in seconds.  `f64::INFINITY` = unbounded.
    pub max_time_secs: f64,
}

impl SimConfig {
    /// A run bounded only by a visit count.
    pub fn visits(max_visits: u64) -> Self {
        Self { trade_id: 0, max_visits, max_time_secs: f64::INFINITY }
    }

    /// A run bounded only by simulated time.
    pub fn seconds(max_time_secs: f64) -> Self {
        Self { trade_id: 0, max_visits: u64::MAX, max_time_secs }
    }

    /// `true` while neither budget has been exceeded.
    #[inline]
    pub fn continues(&self, visit_num: u64, time: f64) -> bool {
        visit_num <= self.max_visits && time <= self.max_time_secs
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { trade_id: 0, max_visits: u64::MAX, max_time_secs: f64::INFINITY }
    }
}

/// Seconds elapsed between `from` and `to` that fall inside the accrual
/// window starting at `activation`.
///
/// A task does not accrue age before it activates, so only the part of the
/// interval at or after `activation` counts.  Never negative.
#[inline]
pub fn active_span(from: f64, to: f64, activation: f64) -> f64 {
    (to - from.max(activation)).max(0.0)
}
