//! Task layouts.
//!
//! A scenario names its layout with a [`Geometry`], which is one of three
//! shapes in JSON:
//!
//! ```json
//! "geometry": "circle_rtb_5"
//! "geometry": { "points": [{ "x": 0, "y": 0 }, { "x": 800, "y": 0 }] }
//! "geometry": { "count": 12, "half_width": 4000, "seed": 7 }
//! ```
//!
//! # Named layouts
//!
//! | Tag                          | Tasks | Layout                                                     |
//! |------------------------------|-------|------------------------------------------------------------|
//! | `twopt_<d>`                  | 2     | `(0, 0)` and `(d, 0)`                                      |
//! | `eqtri`                      | 3     | equilateral triangle, 250 m sides                          |
//! | `eqtri_perturb`              | 3     | `eqtri` with the second vertex nudged 5 m                  |
//! | `isotri`                     | 3     | isosceles triangle, 250 m base                             |
//! | `circle`                     | 10    | radius 5000 m, task k at angle 2πk/10                      |
//! | `circle_rtb_<n>`             | n + 1 | base at the origin, then n tasks on the 5000 m circle      |
//! | `circle_rtb_10_offset<p>`    | 11    | `circle_rtb_10` with the base at `(0, 5000·p/100)`         |
//! | `grid`                       | 16    | 4×4, 1000 m spacing, column by column from the top         |
//! | `random`                     | 10    | fixed wide-area layout                                     |
//! | `random_centroid_<p>`        | 11    | `random` plus a base offset p% from its centroid (p = 0, 10, …, 100) |
//! | `clusters`                   | 10    | three fixed clusters                                       |
//!
//! On the `circle_rtb_*` layouts, ring task k (k = 2..=n+1) sits at angle
//! 2πk/n, so the first ring task is not on the x axis.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use pisr_core::{Point, SimRng};

use crate::{ScenarioError, ScenarioResult};

/// Ring radius of every circular layout, metres.
pub const CIRCLE_RADIUS: f64 = 5000.0;

const RANDOM_X: [f64; 10] = [-4500.0, -2000.0, -1000.0, -2500.0, 2000.0, 1000.0, 3000.0, 1000.0, 5000.0, 2000.0];
const RANDOM_Y: [f64; 10] = [-1000.0, 1000.0, 1000.0, 3500.0, -2500.0, -1000.0, 1000.0, 2000.0, 3500.0, 5500.0];

/// Centroid of the `random` layout, rounded to the metre.
const RANDOM_CENTROID: Point = Point { x: 400.0, y: 1300.0 };

/// North offset of the `random_centroid_<p>` base for p = 0, 10, …, 100.
/// 5413 m is the distance from the centroid to the furthest task.
const RANDOM_CENTROID_OFFSETS: [f64; 11] =
    [0.0, 541.0, 1083.0, 1624.0, 2165.0, 2707.0, 3248.0, 3789.0, 4330.0, 4871.0, 5413.0];

const CLUSTERS_X: [f64; 10] = [-2777.0, -1888.0, -2550.0, 2500.0, 3916.0, 2756.0, 1850.0, 2882.0, 2518.0, 3528.0];
const CLUSTERS_Y: [f64; 10] = [2961.0, 2114.0, 927.0, 2500.0, 1505.0, 3552.0, -2800.0, -1915.0, -3833.0, -3274.0];

/// Where the tasks of a scenario are.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Geometry {
    /// One of the named layouts in the module table.
    Named(String),
    /// Explicit coordinates, task 1 first.
    Explicit { points: Vec<Point> },
    /// `count` tasks drawn uniformly from the square `[-half_width, half_width]²`.
    Scatter { count: usize, half_width: f64, seed: u64 },
}

impl Geometry {
    /// Task positions in task order.
    pub fn positions(&self) -> ScenarioResult<Vec<Point>> {
        let points = match self {
            Geometry::Named(tag) => named_layout(tag)?,
            Geometry::Explicit { points } => points.clone(),
            Geometry::Scatter { count, half_width, seed } => scatter(*count, *half_width, *seed)?,
        };
        if points.is_empty() {
            return Err(ScenarioError::Config("task geometry has no tasks".into()));
        }
        Ok(points)
    }
}

/// Resolve a named layout tag.
pub fn named_layout(tag: &str) -> ScenarioResult<Vec<Point>> {
    let unknown = || ScenarioError::UnknownGeometry(tag.to_owned());

    let points = match tag {
        "eqtri" => zip(&[0.0, 250.0, 125.0], &[0.0, 0.0, 216.5]),
        "eqtri_perturb" => zip(&[0.0, 255.0, 125.0], &[0.0, 0.0, 216.5]),
        "isotri" => zip(&[0.0, 250.0, 125.0], &[0.0, 0.0, 341.5]),
        "circle" => (1..=10).map(|k| on_circle(k, 10)).collect(),
        "grid" => (0..4)
            .flat_map(|col| (0..4).map(move |row| Point::new(1000.0 * col as f64, 3000.0 - 1000.0 * row as f64)))
            .collect(),
        "random" => zip(&RANDOM_X, &RANDOM_Y),
        "clusters" => zip(&CLUSTERS_X, &CLUSTERS_Y),
        _ => {
            if let Some(d) = tag.strip_prefix("twopt_") {
                let d: f64 = d.parse().map_err(|_| unknown())?;
                if !(d > 0.0 && d.is_finite()) {
                    return Err(unknown());
                }
                vec![Point::new(0.0, 0.0), Point::new(d, 0.0)]
            } else if let Some(p) = tag.strip_prefix("circle_rtb_10_offset") {
                let p: f64 = p.parse().map_err(|_| unknown())?;
                based_ring(Point::new(0.0, CIRCLE_RADIUS * p / 100.0), 10)
            } else if let Some(n) = tag.strip_prefix("circle_rtb_") {
                let n: usize = n.parse().map_err(|_| unknown())?;
                if n == 0 {
                    return Err(unknown());
                }
                based_ring(Point::new(0.0, 0.0), n)
            } else if let Some(p) = tag.strip_prefix("random_centroid_") {
                let p: usize = p.parse().map_err(|_| unknown())?;
                if p % 10 != 0 || p > 100 {
                    return Err(unknown());
                }
                let base = Point::new(RANDOM_CENTROID.x, RANDOM_CENTROID.y + RANDOM_CENTROID_OFFSETS[p / 10]);
                std::iter::once(base).chain(zip(&RANDOM_X, &RANDOM_Y)).collect()
            } else {
                return Err(unknown());
            }
        }
    };
    Ok(points)
}

/// Uniform scatter over `[-half_width, half_width]²`, reproducible by seed.
pub fn scatter(count: usize, half_width: f64, seed: u64) -> ScenarioResult<Vec<Point>> {
    if !(half_width > 0.0 && half_width.is_finite()) {
        return Err(ScenarioError::Config(format!("scatter half width {half_width} must be positive")));
    }
    let mut rng = SimRng::new(seed);
    Ok((0..count)
        .map(|_| {
            let x = rng.gen_range(-half_width..=half_width);
            let y = rng.gen_range(-half_width..=half_width);
            Point::new(x, y)
        })
        .collect())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn zip(xs: &[f64], ys: &[f64]) -> Vec<Point> {
    xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)).collect()
}

fn on_circle(k: usize, n: usize) -> Point {
    let angle = TAU * k as f64 / n as f64;
    Point::new(CIRCLE_RADIUS * angle.cos(), CIRCLE_RADIUS * angle.sin())
}

/// `base` followed by `n` ring tasks at angles 2πk/n, k = 2..=n+1.
fn based_ring(base: Point, n: usize) -> Vec<Point> {
    std::iter::once(base).chain((2..=n + 1).map(|k| on_circle(k, n))).collect()
}
