//! Impact rating of a no-fly-zone map on a task layout.
//!
//! ```text
//! rating = mean constrained distance / mean Euclidean distance
//! ```
//!
//! both means taken over ordered task pairs `i ≠ j`.  A rating of 1.0 means
//! the obstacles never lengthen a leg.  Used for reporting only.

use pisr_core::geo::polyline_length;
use pisr_core::Point;
use pisr_fleet::TaskRegistry;

use crate::strategy::ConstrainedPathing;
use crate::{PathingError, PathingResult};

/// Compute the impact rating of `pathing` over every ordered pair of tasks.
///
/// Returns 1.0 for fewer than two tasks or when all tasks are co-located.
/// With the `parallel` feature solver calls fan out over Rayon; results are
/// still summed in pair order.
pub fn impact_rating(pathing: &ConstrainedPathing, tasks: &TaskRegistry) -> PathingResult<f64> {
    let positions: Vec<Point> = tasks.iter().map(|t| t.position).collect();
    let pairs: Vec<(Point, Point)> = positions
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| {
            positions
                .iter()
                .enumerate()
                .filter(move |&(j, _)| j != i)
                .map(move |(_, &b)| (a, b))
        })
        .collect();

    let euclidean = tasks.mean_pairwise_distance();
    if pairs.is_empty() || euclidean == 0.0 {
        return Ok(1.0);
    }

    let solve = |&(from, to): &(Point, Point)| -> PathingResult<f64> {
        let points = pathing.solver.solve(from, to, &pathing.map_id, &pathing.zone_id)?;
        if points.is_empty() {
            return Err(PathingError::EmptyPath { from, to });
        }
        Ok(polyline_length(&points))
    };

    #[cfg(not(feature = "parallel"))]
    let lengths: Vec<f64> = pairs.iter().map(solve).collect::<PathingResult<_>>()?;

    #[cfg(feature = "parallel")]
    let lengths: Vec<f64> = {
        use rayon::prelude::*;
        pairs.par_iter().map(solve).collect::<PathingResult<_>>()?
    };

    let constrained = lengths.iter().sum::<f64>() / lengths.len() as f64;
    let rating = constrained / euclidean;
    tracing::info!(
        map = %pathing.map_id,
        zone = %pathing.zone_id,
        pairs = lengths.len(),
        rating,
        "computed impact rating"
    );
    Ok(rating)
}
