//! Priority-weighted latency over a run.
//!
//! Total weighted latency at time `t` is
//!
//! ```text
//! L(t) = Σ_j p_j · age_j(t)
//! ```
//!
//! Task ages grow linearly between snapshots, so integrating `L` with the
//! trapezoid rule over consecutive snapshots gives the time average `L̄`.
//! The only error is inside the 0.01 s window between a pre-visit and a
//! post-visit snapshot, where the reset is smeared across the window.

use std::fmt;

use pisr_sim::AgeSnapshot;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LatencySummary {
    /// Time-averaged `L`, `L̄`.
    pub mean_latency: f64,
    /// Largest `L` at any snapshot.
    pub max_latency:  f64,
    /// Largest age each task reached, task 1 first.
    pub max_ages:     Vec<f64>,
    /// Seconds between the first and last snapshot.
    pub duration:     f64,
}

impl LatencySummary {
    /// Summarise a run's age snapshots.  An empty history gives an all-zero
    /// summary; a single snapshot gives `L̄ = L` at that instant.
    pub fn from_history(ages: &[AgeSnapshot], priorities: &[f64]) -> Self {
        let Some(first) = ages.first() else {
            return Self::default();
        };

        let latencies: Vec<f64> = ages.iter().map(|s| weighted_latency(&s.ages, priorities)).collect();

        let mut area = 0.0;
        for (pair, l) in ages.windows(2).zip(latencies.windows(2)) {
            area += 0.5 * (l[0] + l[1]) * (pair[1].time - pair[0].time);
        }
        let duration = ages[ages.len() - 1].time - first.time;
        let mean_latency = if duration > 0.0 { area / duration } else { latencies[0] };

        let mut max_ages = vec![0.0f64; first.ages.len()];
        for snap in ages {
            for (m, &a) in max_ages.iter_mut().zip(&snap.ages) {
                *m = m.max(a);
            }
        }

        Self {
            mean_latency,
            max_latency: latencies.iter().copied().fold(0.0, f64::max),
            max_ages,
            duration,
        }
    }
}

/// `Σ p_j · age_j` for one snapshot.
pub fn weighted_latency(ages: &[f64], priorities: &[f64]) -> f64 {
    ages.iter().zip(priorities).map(|(a, p)| a * p).sum()
}

impl fmt::Display for LatencySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  L̄      : {:.2}", self.mean_latency)?;
        writeln!(f, "  L_max  : {:.2}", self.max_latency)?;
        writeln!(f, "  span   : {:.2} s", self.duration)?;
        for (i, age) in self.max_ages.iter().enumerate() {
            writeln!(f, "  task {:>3} max age: {age:.2} s", i + 1)?;
        }
        Ok(())
    }
}
