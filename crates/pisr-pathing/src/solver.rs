//! External obstacle-avoidance path solver.
//!
//! # Pluggability
//!
//! Constrained pathing calls the solver through the [`PathSolver`] trait, so
//! a run can be wired to a native binding, a subprocess, or an in-process
//! stand-in for tests.  The solver returns only a polyline; the caller
//! measures its length.
//!
//! Calls are blocking and never retried: solver inputs are purely geometric,
//! so a retry would produce the same outcome.

use std::path::PathBuf;
use std::process::Command;

use pisr_core::Point;

use crate::{PathingError, PathingResult};

// ── PathSolver trait ──────────────────────────────────────────────────────────

/// Obstacle-aware shortest-path service.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so impact-rating can fan solver
/// calls out across Rayon workers.
pub trait PathSolver: Send + Sync {
    /// Polyline from `from` to `to` avoiding the no-fly zones of `zone_id`
    /// on map `map_id`.
    fn solve(&self, from: Point, to: Point, map_id: &str, zone_id: &str) -> PathingResult<Vec<Point>>;
}

// ── CommandSolver ─────────────────────────────────────────────────────────────

/// Runs an external executable once per query.
///
/// The executable receives `x0 y0 x1 y1 map_id zone_id` as trailing
/// arguments and must print one waypoint per line as `x,y` (a trailing comma
/// is accepted) on stdout.
#[derive(Clone, Debug)]
pub struct CommandSolver {
    pub program: PathBuf,
    /// Arguments placed before the query arguments.
    pub args:    Vec<String>,
}

impl CommandSolver {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl PathSolver for CommandSolver {
    fn solve(&self, from: Point, to: Point, map_id: &str, zone_id: &str) -> PathingResult<Vec<Point>> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .args([
                from.x.to_string(),
                from.y.to_string(),
                to.x.to_string(),
                to.y.to_string(),
                map_id.to_owned(),
                zone_id.to_owned(),
            ])
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PathingError::Solver(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let points = parse_polyline(&stdout)?;
        if points.is_empty() {
            return Err(PathingError::EmptyPath { from, to });
        }
        tracing::trace!(
            program = %self.program.display(),
            %from,
            %to,
            waypoints = points.len(),
            "solver returned path"
        );
        Ok(points)
    }
}

/// Parse solver output: one `x,y` or `x,y,` waypoint per line; blank lines
/// are skipped.
pub fn parse_polyline(text: &str) -> PathingResult<Vec<Point>> {
    let mut points = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let bad = || PathingError::SolverOutput { line: i + 1, content: line.to_owned() };

        let mut fields = line.split(',').map(str::trim);
        let x = fields.next().and_then(|f| f.parse::<f64>().ok()).ok_or_else(bad)?;
        let y = fields.next().and_then(|f| f.parse::<f64>().ok()).ok_or_else(bad)?;
        if fields.any(|rest| !rest.is_empty()) {
            return Err(bad());
        }
        points.push(Point::new(x, y));
    }
    Ok(points)
}
