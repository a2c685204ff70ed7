/// Continuum layer: hull construction, envelope interpolation, ratio.
///
/// Architecture:
/// ```text
///   PointSequence
///        │
///        ▼
///   ┌──────────┐
///   │   hull    │  gift-wrapping walk (orientation predicate)
///   └──────────┘
///        │ Hull
///        ▼
///   ┌─────────────┐
///   │ interpolate  │  sort hull by x, sweep original x → envelope
///   └─────────────┘
///        │ continuum
///        ▼
///   ┌──────────┐
///   │ removal   │  original / continuum, flag bad samples
///   └──────────┘
///        │
///        ▼
///   ContinuumRemovedSeries
/// ```

pub mod hull;
pub mod interpolate;
pub mod orientation;
pub mod removal;

use log::{debug, warn};

use crate::data::model::{ContinuumRemovedSeries, Point, PointSequence};
use crate::error::ContinuumError;

pub use hull::compute_hull;
pub use interpolate::interpolate_and_fill;
pub use removal::continuum_ratio;

/// The continuum envelope of `original`, one point per input sample.
pub fn continuum(original: &PointSequence) -> Result<Vec<Point>, ContinuumError> {
    let mut hull = compute_hull(original.as_slice())?;
    if !original.is_sorted_by_x() {
        warn!("input x is not in non-decreasing order; continuum interpolation will be unreliable");
    }
    let mut envelope = original.as_slice().to_vec();
    interpolate_and_fill(&mut envelope, &mut hull);
    Ok(envelope)
}

/// Run the full pipeline. `original` is left untouched, so repeated calls
/// give bit-identical results.
pub fn remove_continuum(original: &PointSequence) -> Result<ContinuumRemovedSeries, ContinuumError> {
    let envelope = continuum(original)?;
    let series = continuum_ratio(original.as_slice(), &envelope);

    let flagged = series.flagged_count();
    if flagged > 0 {
        warn!("{flagged} of {} samples have no usable continuum", series.len());
    }
    debug!("continuum removed for {} samples", series.len());
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SampleQuality;
    use approx::assert_relative_eq;

    fn seq(raw: &[(f64, f64)]) -> PointSequence {
        PointSequence::from_points(raw.iter().map(|&p| p.into()).collect(), 200).unwrap()
    }

    /// Sloped continuum with two Gaussian absorption bands.
    fn absorption_spectrum(n: usize) -> PointSequence {
        let points = (0..n)
            .map(|i| {
                let x = 400.0 + i as f64 * 10.0;
                let base = 0.8 - (x - 400.0) * 1e-4;
                let band = |mu: f64, sigma: f64, depth: f64| {
                    depth * (-(x - mu).powi(2) / (2.0 * sigma * sigma)).exp()
                };
                Point::new(x, base - band(900.0, 60.0, 0.3) - band(1800.0, 90.0, 0.2))
            })
            .collect();
        PointSequence::from_points(points, n).unwrap()
    }

    #[test]
    fn pipeline_on_small_spectrum() {
        let series = remove_continuum(&seq(&[
            (1.0, 2.0),
            (2.0, 5.0),
            (3.0, 3.0),
            (4.0, 6.0),
            (5.0, 1.0),
        ]))
        .unwrap();

        let ys: Vec<f64> = series.samples.iter().map(|s| s.y).collect();
        assert_eq!(ys[0], 1.0);
        assert_eq!(ys[1], 1.0);
        assert_relative_eq!(ys[2], 3.0 / 5.5, epsilon = 1e-12);
        assert_eq!(ys[3], 1.0);
        assert_eq!(ys[4], 1.0);
        assert_eq!(series.flagged_count(), 0);
    }

    #[test]
    fn envelope_lies_on_or_above_every_sample() {
        let input = absorption_spectrum(150);
        let envelope = continuum(&input).unwrap();
        for (orig, cont) in input.as_slice().iter().zip(&envelope) {
            assert!(orig.y <= cont.y + 1e-12, "{orig:?} above {cont:?}");
        }
    }

    #[test]
    fn removed_values_are_at_most_one() {
        let series = remove_continuum(&absorption_spectrum(150)).unwrap();
        assert!(series.samples.iter().all(|s| s.y <= 1.0 + 1e-12));
        assert_eq!(series.samples.first().map(|s| s.y), Some(1.0));
        assert_eq!(series.samples.last().map(|s| s.y), Some(1.0));
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let input = absorption_spectrum(120);
        let first = remove_continuum(&input).unwrap();
        let second = remove_continuum(&input).unwrap();
        assert!(first.bit_identical(&second));
    }

    #[test]
    fn all_zero_spectrum_is_flagged() {
        let series = remove_continuum(&seq(&[(1.0, 0.0), (2.0, 0.0), (3.0, 0.0)])).unwrap();
        assert_eq!(series.flagged_count(), 3);
        assert!(series
            .samples
            .iter()
            .all(|s| s.quality == SampleQuality::NonPositiveContinuum && s.y.is_nan()));
    }

    #[test]
    fn single_point_pipeline() {
        let series = remove_continuum(&seq(&[(5.0, 5.0)])).unwrap();
        assert_eq!(series.samples[0].y, 1.0);
    }

    #[test]
    fn empty_input_is_invalid() {
        let err = remove_continuum(&seq(&[])).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn unsorted_input_follows_the_forward_cursor() {
        let input = seq(&[(2.0, 5.0), (1.0, 2.0), (3.0, 3.0), (4.0, 6.0), (5.0, 1.0)]);

        // Hull is (2,5) (4,6) (5,1); x = 1 lies left of it and is
        // extrapolated along the first segment.
        let envelope: Vec<f64> = continuum(&input).unwrap().iter().map(|p| p.y).collect();
        assert_eq!(envelope, vec![5.0, 4.5, 5.5, 6.0, 1.0]);

        let series = remove_continuum(&input).unwrap();
        let xs: Vec<f64> = series.samples.iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![2.0, 1.0, 3.0, 4.0, 5.0]);
        assert_eq!(series.samples[0].y, 1.0);
        assert_relative_eq!(series.samples[1].y, 2.0 / 4.5, epsilon = 1e-12);
        assert_relative_eq!(series.samples[2].y, 3.0 / 5.5, epsilon = 1e-12);
        assert_eq!(series.flagged_count(), 0);
    }
}
