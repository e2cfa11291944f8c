//! Planar coordinates, oriented poses, and heading arithmetic.
//!
//! All positions are metres in a local east/north frame; headings are
//! radians measured counter-clockwise from due east.

use std::f64::consts::TAU;

/// A position in the local planar frame.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance in metres.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Free-function form of [`Point::distance`].
#[inline]
pub fn euclidean_distance(p0: Point, p1: Point) -> f64 {
    p0.distance(p1)
}

/// A position plus a heading.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Pose {
    pub point:   Point,
    /// Radians, counter-clockwise from east.
    pub heading: f64,
}

impl Pose {
    #[inline]
    pub const fn new(point: Point, heading: f64) -> Self {
        Self { point, heading }
    }
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn mod2pi(theta: f64) -> f64 {
    let wrapped = theta.rem_euclid(TAU);
    // rem_euclid can return exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Total length of a polyline (sum of consecutive segment lengths).
///
/// Returns 0 for fewer than two points.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Coordinated-turn radius (metres) for `speed` (m/s) at `bank_angle`
/// (radians), using standard gravity.
///
/// A 90° bank gives a radius of (effectively) zero, i.e. straight-line travel.
#[inline]
pub fn turn_radius(speed: f64, bank_angle: f64) -> f64 {
    const G: f64 = 9.807; // m/s²
    speed * speed / (G * bank_angle.tan())
}
