use crate::data::model::{ContinuumRemovedSeries, Point, Sample, SampleQuality};

/// Divide each original intensity by its continuum value.
///
/// Samples whose continuum is zero, negative or NaN, or whose ratio is not
/// finite, are flagged and carry `y = NaN`.
pub fn continuum_ratio(original: &[Point], continuum: &[Point]) -> ContinuumRemovedSeries {
    debug_assert_eq!(original.len(), continuum.len());

    let samples = original
        .iter()
        .zip(continuum)
        .map(|(orig, cont)| {
            let c = cont.y;
            let quality = if c.is_nan() {
                SampleQuality::NonFiniteRatio
            } else if c <= 0.0 {
                SampleQuality::NonPositiveContinuum
            } else if !(orig.y / c).is_finite() {
                SampleQuality::NonFiniteRatio
            } else {
                SampleQuality::Valid
            };
            let y = match quality {
                SampleQuality::Valid => orig.y / c,
                _ => f64::NAN,
            };
            Sample {
                x: orig.x,
                y,
                continuum: c,
                quality,
            }
        })
        .collect();

    ContinuumRemovedSeries { samples }
}
