use crate::data::model::{Hull, Point};

// ---------------------------------------------------------------------------
// Linear interpolation between two hull vertices
// ---------------------------------------------------------------------------

/// Linear interpolation of the line through `p1` and `p2` at `x`.
///
/// A zero-width segment yields the first strictly positive of `p1.y`,
/// `p2.y`, falling back to 0.
pub fn interpolate(x: f64, p1: Point, p2: Point) -> f64 {
    let denominator = p2.x - p1.x;
    if denominator == 0.0 {
        if p1.y > 0.0 {
            p1.y
        } else if p2.y > 0.0 {
            p2.y
        } else {
            0.0
        }
    } else {
        p1.y + (x - p1.x) * (p2.y - p1.y) / denominator
    }
}

// ---------------------------------------------------------------------------
// Sweep: replace intensities with the hull envelope
// ---------------------------------------------------------------------------

/// Sort `hull` by x, then overwrite each `points[i].y` with the hull
/// envelope at `points[i].x` wherever that envelope is strictly positive.
///
/// The segment cursor only moves forward, so `points` should be in
/// non-decreasing x order; unsorted input is not rejected but interpolates
/// against the wrong segments. Past the last vertex the segment degenerates
/// to that vertex alone. An x left of the first vertex (possible when the
/// hull walk did not start at the minimum-x point) is extrapolated along the
/// first segment, not clamped.
pub fn interpolate_and_fill(points: &mut [Point], hull: &mut Hull) {
    if hull.is_empty() {
        return;
    }
    hull.sort_by_x();
    let vertices = &hull.points;
    let last = vertices.len() - 1;

    let mut j = 0;
    for point in points.iter_mut() {
        let x = point.x;
        while j < last && vertices[j + 1].x <= x {
            j += 1;
        }

        let upper = if j < last { vertices[j + 1] } else { vertices[j] };
        let value = interpolate(x, vertices[j], upper);
        if value > 0.0 {
            point.y = value;
        }
    }
}
