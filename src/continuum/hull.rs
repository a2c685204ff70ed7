use log::debug;

use super::orientation::orientation;
use crate::data::model::{Hull, Point};
use crate::error::ContinuumError;

// ---------------------------------------------------------------------------
// Gift-wrapping (Jarvis march), clockwise from index 0 to the max-x point
// ---------------------------------------------------------------------------

/// Build the upper hull of `points` by walking clockwise from the point at
/// index 0 until the max-x point is reached.
///
/// Index 0 is taken as the start even when it is not the minimum-x point;
/// for unsorted input this changes which vertices the walk visits.
///
/// Every step scans all `n` points, including those already on the hull, so
/// the walk is capped at `n - 1` steps and reports
/// [`ContinuumError::HullWalkDiverged`] instead of looping forever.
pub fn compute_hull(points: &[Point]) -> Result<Hull, ContinuumError> {
    let n = points.len();
    if n < 1 {
        return Err(ContinuumError::TooFewPoints { got: n, min: 1 });
    }

    let max_x_index = max_x_index(points);
    if points.iter().any(|pt| pt.x < points[0].x) {
        debug!("hull start (index 0, x = {}) is not the minimum-x point", points[0].x);
    }

    let mut hull = Hull {
        points: Vec::with_capacity(n),
    };
    let mut p = 0;
    while p != max_x_index {
        if hull.len() >= n - 1 {
            return Err(ContinuumError::HullWalkDiverged { steps: hull.len() });
        }
        hull.points.push(points[p]);
        p = most_clockwise(points, p);
    }
    hull.points.push(points[max_x_index]);

    debug!("hull: {} of {} points", hull.len(), n);
    Ok(hull)
}

/// Index of the first point with the greatest x.
fn max_x_index(points: &[Point]) -> usize {
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        if pt.x > points[best].x {
            best = i;
        }
    }
    best
}

/// The candidate `q` such that no point lies clockwise of `p → q`.
///
/// Exact collinear ties go to the farther point in the same direction, which
/// drops interior points of straight runs from the hull.
fn most_clockwise(points: &[Point], p: usize) -> usize {
    let n = points.len();
    let origin = points[p];
    let mut q = (p + 1) % n;
    for (i, &candidate) in points.iter().enumerate() {
        let turn = orientation(origin, candidate, points[q]);
        if turn > 0.0 || (turn == 0.0 && farther_along(origin, points[q], candidate)) {
            q = i;
        }
    }
    q
}

fn farther_along(origin: Point, current: Point, candidate: Point) -> bool {
    let (cx, cy) = (current.x - origin.x, current.y - origin.y);
    let (dx, dy) = (candidate.x - origin.x, candidate.y - origin.y);
    cx * dx + cy * dy > 0.0 && dx * dx + dy * dy > cx * cx + cy * cy
}
