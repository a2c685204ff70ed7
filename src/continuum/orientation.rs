use crate::data::model::Point;

/// Signed turn of `r` relative to the directed segment `p → q`.
///
/// Positive is clockwise, zero is collinear, negative is counter-clockwise.
/// NaN and infinities propagate.
#[inline]
pub fn orientation(p: Point, q: Point, r: Point) -> f64 {
    (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)
}
