//! Shortest curvature-bounded paths between oriented poses (Dubins curves).
//!
//! # Method
//!
//! The start/goal pair is normalised so the start sits at the origin, the
//! goal lies on the +x axis, and distances are measured in turning radii:
//!
//! ```text
//! d     = |goal - start| / ρ
//! θ     = atan2(dy, dx)
//! α     = start.heading - θ      (mod 2π)
//! β     = goal.heading  - θ      (mod 2π)
//! ```
//!
//! Each of the six classical words (LSL, LSR, RSL, RSR, RLR, LRL) is solved in
//! closed form for its three segment parameters `(t, p, q)`; infeasible words
//! are skipped and the candidate with the smallest `t + p + q` wins.  Path
//! length is `(t + p + q) · ρ`.

use crate::geo::{mod2pi, Point, Pose};
use crate::{CoreError, CoreResult};

use std::f64::consts::{PI, TAU};

/// Number of equal arc-length steps used when sampling a trajectory for
/// logging.  A sampled trajectory therefore holds `SAMPLE_STEPS + 1` points.
pub const SAMPLE_STEPS: usize = 20;

// ── Words and segments ───────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Segment {
    Left,
    Straight,
    Right,
}

/// One of the six Dubins path families.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DubinsWord {
    Lsl,
    Lsr,
    Rsl,
    Rsr,
    Rlr,
    Lrl,
}

impl DubinsWord {
    /// Candidate evaluation order.  Ties keep the earliest word.
    pub const ALL: [DubinsWord; 6] = [
        DubinsWord::Lsl,
        DubinsWord::Lsr,
        DubinsWord::Rsl,
        DubinsWord::Rsr,
        DubinsWord::Rlr,
        DubinsWord::Lrl,
    ];

    fn segments(self) -> [Segment; 3] {
        use Segment::*;
        match self {
            DubinsWord::Lsl => [Left, Straight, Left],
            DubinsWord::Lsr => [Left, Straight, Right],
            DubinsWord::Rsl => [Right, Straight, Left],
            DubinsWord::Rsr => [Right, Straight, Right],
            DubinsWord::Rlr => [Right, Left, Right],
            DubinsWord::Lrl => [Left, Right, Left],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DubinsWord::Lsl => "LSL",
            DubinsWord::Lsr => "LSR",
            DubinsWord::Rsl => "RSL",
            DubinsWord::Rsr => "RSR",
            DubinsWord::Rlr => "RLR",
            DubinsWord::Lrl => "LRL",
        }
    }

    /// Closed-form segment parameters, or `None` if the word is infeasible
    /// for this geometry.
    fn solve(self, n: &Normalized) -> Option<[f64; 3]> {
        match self {
            DubinsWord::Lsl => {
                let tmp0 = n.d + n.sa - n.sb;
                let p_sq = 2.0 + n.d_sq - 2.0 * n.c_ab + 2.0 * n.d * (n.sa - n.sb);
                if p_sq < 0.0 {
                    return None;
                }
                let tmp1 = (n.cb - n.ca).atan2(tmp0);
                Some([mod2pi(tmp1 - n.alpha), p_sq.sqrt(), mod2pi(n.beta - tmp1)])
            }
            DubinsWord::Rsr => {
                let tmp0 = n.d - n.sa + n.sb;
                let p_sq = 2.0 + n.d_sq - 2.0 * n.c_ab + 2.0 * n.d * (n.sb - n.sa);
                if p_sq < 0.0 {
                    return None;
                }
                let tmp1 = (n.ca - n.cb).atan2(tmp0);
                Some([mod2pi(n.alpha - tmp1), p_sq.sqrt(), mod2pi(tmp1 - n.beta)])
            }
            DubinsWord::Lsr => {
                let p_sq = -2.0 + n.d_sq + 2.0 * n.c_ab + 2.0 * n.d * (n.sa + n.sb);
                if p_sq < 0.0 {
                    return None;
                }
                let p = p_sq.sqrt();
                let tmp0 = (-n.ca - n.cb).atan2(n.d + n.sa + n.sb) - (-2.0f64).atan2(p);
                Some([mod2pi(tmp0 - n.alpha), p, mod2pi(tmp0 - mod2pi(n.beta))])
            }
            DubinsWord::Rsl => {
                let p_sq = -2.0 + n.d_sq + 2.0 * n.c_ab - 2.0 * n.d * (n.sa + n.sb);
                if p_sq < 0.0 {
                    return None;
                }
                let p = p_sq.sqrt();
                let tmp0 = (n.ca + n.cb).atan2(n.d - n.sa - n.sb) - 2.0f64.atan2(p);
                Some([mod2pi(n.alpha - tmp0), p, mod2pi(n.beta - tmp0)])
            }
            DubinsWord::Rlr => {
                let tmp0 = (6.0 - n.d_sq + 2.0 * n.c_ab + 2.0 * n.d * (n.sa - n.sb)) / 8.0;
                if tmp0.abs() > 1.0 {
                    return None;
                }
                let phi = (n.ca - n.cb).atan2(n.d - n.sa + n.sb);
                let p = mod2pi(TAU - tmp0.acos());
                let t = mod2pi(n.alpha - phi + mod2pi(p / 2.0));
                Some([t, p, mod2pi(n.alpha - n.beta - t + mod2pi(p))])
            }
            DubinsWord::Lrl => {
                let tmp0 = (6.0 - n.d_sq + 2.0 * n.c_ab + 2.0 * n.d * (n.sb - n.sa)) / 8.0;
                if tmp0.abs() > 1.0 {
                    return None;
                }
                let phi = (n.ca - n.cb).atan2(n.d + n.sa - n.sb);
                let p = mod2pi(TAU - tmp0.acos());
                let t = mod2pi(-n.alpha - phi + p / 2.0);
                Some([t, p, mod2pi(mod2pi(n.beta) - n.alpha - t + mod2pi(p))])
            }
        }
    }
}

impl std::fmt::Display for DubinsWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Start/goal geometry expressed in turning radii with the goal on the +x axis.
struct Normalized {
    alpha: f64,
    beta:  f64,
    d:     f64,
    sa:    f64,
    sb:    f64,
    ca:    f64,
    cb:    f64,
    c_ab:  f64,
    d_sq:  f64,
}

impl Normalized {
    fn new(start: Pose, goal: Pose, rho: f64) -> Self {
        let dx = goal.point.x - start.point.x;
        let dy = goal.point.y - start.point.y;
        let d = dx.hypot(dy) / rho;
        let theta = if d > 0.0 { mod2pi(dy.atan2(dx)) } else { 0.0 };
        let alpha = mod2pi(start.heading - theta);
        let beta = mod2pi(goal.heading - theta);
        Self {
            alpha,
            beta,
            d,
            sa: alpha.sin(),
            sb: beta.sin(),
            ca: alpha.cos(),
            cb: beta.cos(),
            c_ab: (alpha - beta).cos(),
            d_sq: d * d,
        }
    }
}

// ── DubinsPath ───────────────────────────────────────────────────────────────

/// A solved Dubins path.
#[derive(Clone, Debug, PartialEq)]
pub struct DubinsPath {
    pub start:  Pose,
    pub goal:   Pose,
    /// Turning radius in metres.
    pub rho:    f64,
    pub word:   DubinsWord,
    /// Segment parameters `(t, p, q)` in units of `rho`.
    pub params: [f64; 3],
}

impl DubinsPath {
    /// Total path length in metres.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.params[0] + self.params[1] + self.params[2]) * self.rho
    }

    /// Pose after travelling `s` metres along the path (clamped to the path).
    pub fn pose_at(&self, s: f64) -> Pose {
        let segs = self.word.segments();
        let [p1, p2, _] = self.params;
        let total = self.params.iter().sum::<f64>();
        let tprime = (s / self.rho).clamp(0.0, total);

        let qi = (0.0, 0.0, self.start.heading);
        let q1 = advance(p1, qi, segs[0]);
        let q2 = advance(p2, q1, segs[1]);

        let q = if tprime < p1 {
            advance(tprime, qi, segs[0])
        } else if tprime < p1 + p2 {
            advance(tprime - p1, q1, segs[1])
        } else {
            advance(tprime - p1 - p2, q2, segs[2])
        };

        Pose::new(
            Point::new(
                q.0 * self.rho + self.start.point.x,
                q.1 * self.rho + self.start.point.y,
            ),
            mod2pi(q.2),
        )
    }

    /// `steps + 1` waypoints at equal arc-length spacing.  The first and last
    /// points are exactly the start and goal positions.
    pub fn sample(&self, steps: usize) -> Vec<Point> {
        let steps = steps.max(1);
        let length = self.length();
        let mut points: Vec<Point> = (0..=steps)
            .map(|i| self.pose_at(length * i as f64 / steps as f64).point)
            .collect();
        points[0] = self.start.point;
        points[steps] = self.goal.point;
        points
    }
}

/// Move `t` (in radii) along one segment starting from normalised pose `qi`.
fn advance(t: f64, qi: (f64, f64, f64), seg: Segment) -> (f64, f64, f64) {
    let (st, ct) = qi.2.sin_cos();
    let (x, y, th) = match seg {
        Segment::Left => ((qi.2 + t).sin() - st, -(qi.2 + t).cos() + ct, t),
        Segment::Right => (-(qi.2 - t).sin() + st, (qi.2 - t).cos() - ct, -t),
        Segment::Straight => (ct * t, st * t, 0.0),
    };
    (x + qi.0, y + qi.1, th + qi.2)
}

// ── Public entry points ──────────────────────────────────────────────────────

/// Solve all six words and return the shortest feasible path.
///
/// # Errors
///
/// [`CoreError::InvalidTurnRadius`] if `rho` is not a finite positive number.
pub fn shortest_path(start: Pose, goal: Pose, rho: f64) -> CoreResult<DubinsPath> {
    if !(rho > 0.0 && rho.is_finite()) {
        return Err(CoreError::InvalidTurnRadius(rho));
    }
    let n = Normalized::new(start, goal, rho);

    let mut best: Option<(DubinsWord, [f64; 3], f64)> = None;
    for word in DubinsWord::ALL {
        if let Some(params) = word.solve(&n) {
            let cost = params[0] + params[1] + params[2];
            if best.is_none_or(|(_, _, c)| cost < c) {
                best = Some((word, params, cost));
            }
        }
    }

    let (word, params, _) = best.ok_or(CoreError::NoDubinsPath)?;
    Ok(DubinsPath { start, goal, rho, word, params })
}

/// Length of the shortest path from `(p0, theta0)` to `(p1, theta1)`.
pub fn shortest_length(p0: Point, theta0: f64, p1: Point, theta1: f64, rho: f64) -> CoreResult<f64> {
    shortest_path(Pose::new(p0, theta0), Pose::new(p1, theta1), rho).map(|p| p.length())
}

/// Length and sampled trajectory ([`SAMPLE_STEPS`] steps) of the shortest
/// path from `(p0, theta0)` to `(p1, theta1)`.
pub fn dubins_shortest(
    p0:     Point,
    theta0: f64,
    p1:     Point,
    theta1: f64,
    rho:    f64,
) -> CoreResult<(f64, Vec<Point>)> {
    let path = shortest_path(Pose::new(p0, theta0), Pose::new(p1, theta1), rho)?;
    Ok((path.length(), path.sample(SAMPLE_STEPS)))
}

/// Discretised arrival headings searched by Dubins pathing: `count` equal
/// steps over `[0, 2π)`.
pub fn heading_grid(count: usize) -> Vec<f64> {
    (0..count).map(|k| k as f64 * TAU / count as f64).collect()
}

/// One degree in radians; the perturbation applied to a candidate arrival
/// heading that would otherwise produce a zero-length path.
pub const HEADING_EPSILON: f64 = PI / 180.0;
