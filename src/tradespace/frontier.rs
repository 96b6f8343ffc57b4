//! 2D Pareto frontier extraction and dominated-region geometry.

use super::antichain::ParetoPoint;
use super::TradespaceError;

/// Keep only points with `time <= time_max`. Errors when nothing remains.
pub fn filter_by_time(
    points: &[ParetoPoint],
    time_max: f64,
) -> Result<Vec<ParetoPoint>, TradespaceError> {
    let retained: Vec<ParetoPoint> = points
        .iter()
        .copied()
        .filter(|point| point.time <= time_max)
        .collect();
    if retained.is_empty() {
        return Err(TradespaceError::EmptyAfterFilter { time_max });
    }
    Ok(retained)
}

/// Indices of the 2D Pareto frontier under minimization in (load, cost).
///
/// Sort by load then cost ascending, scan with a running minimum cost; a
/// point joins the frontier iff its cost strictly improves on the minimum.
/// A later point at equal load and equal-or-higher cost is therefore
/// dropped. O(n log n).
pub fn pareto_2d_min(points: &[ParetoPoint]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        points[a]
            .load
            .total_cmp(&points[b].load)
            .then_with(|| points[a].cost.total_cmp(&points[b].cost))
    });

    let mut frontier = Vec::new();
    let mut best_cost = f64::INFINITY;
    for idx in order {
        if points[idx].cost < best_cost {
            frontier.push(idx);
            best_cost = points[idx].cost;
        }
    }
    frontier
}

/// Polygon filling the region dominated by a (load, cost) frontier, bounded
/// by the plot limits so the fill stays visible even for a single-point
/// frontier. Vertices run from above the first frontier point, along the
/// frontier, to the top-right corner; the closing edge is the top bound.
pub fn dominated_region(frontier: &[(f64, f64)], x_max: f64, y_max: f64) -> Vec<(f64, f64)> {
    if frontier.is_empty() {
        return Vec::new();
    }
    let mut sorted = frontier.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut polygon = Vec::with_capacity(sorted.len() + 2);
    polygon.push((sorted[0].0, y_max));
    polygon.extend_from_slice(&sorted);
    polygon.push((x_max, y_max));
    polygon
}
