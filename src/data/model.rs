use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ContinuumError;

// ---------------------------------------------------------------------------
// Point – one (band, intensity) sample
// ---------------------------------------------------------------------------

/// A single spectral sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Band position / wavelength (x).
    pub x: f64,
    /// Measured intensity (y).
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

// ---------------------------------------------------------------------------
// PointSequence – the capacity-checked input series
// ---------------------------------------------------------------------------

/// The sampled spectrum as read from the input source.
///
/// Growth is bounded by `capacity` (the maximum band count); exceeding it
/// is rejected instead of overflowing.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSequence {
    points: Vec<Point>,
    capacity: usize,
}

impl PointSequence {
    /// An empty sequence that accepts at most `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        PointSequence {
            points: Vec::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Build from already-materialised points, checking the band limit.
    pub fn from_points(points: Vec<Point>, capacity: usize) -> Result<Self, ContinuumError> {
        if points.len() > capacity {
            return Err(ContinuumError::CapacityExceeded { max: capacity });
        }
        Ok(PointSequence { points, capacity })
    }

    /// Append a point, rejecting it once the band limit is reached.
    pub fn push(&mut self, point: Point) -> Result<(), ContinuumError> {
        if self.points.len() >= self.capacity {
            return Err(ContinuumError::CapacityExceeded { max: self.capacity });
        }
        self.points.push(point);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// True when x never decreases along the sequence.
    pub fn is_sorted_by_x(&self) -> bool {
        self.points.windows(2).all(|w| w[0].x <= w[1].x)
    }
}

// ---------------------------------------------------------------------------
// Hull – vertices of the gift-wrapping walk
// ---------------------------------------------------------------------------

/// Hull vertices, in walk order until [`Hull::sort_by_x`] is called.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hull {
    pub points: Vec<Point>,
}

impl Hull {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sort vertices ascending by x.
    pub fn sort_by_x(&mut self) {
        self.points.sort_by(|a, b| a.x.total_cmp(&b.x));
    }
}

// ---------------------------------------------------------------------------
// ContinuumRemovedSeries – the pipeline output
// ---------------------------------------------------------------------------

/// Data-quality marker attached to every output sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleQuality {
    Valid,
    /// The continuum at this band was zero or negative.
    NonPositiveContinuum,
    /// The ratio came out NaN or infinite for any other reason.
    NonFiniteRatio,
}

impl SampleQuality {
    pub fn is_flagged(self) -> bool {
        self != SampleQuality::Valid
    }
}

impl fmt::Display for SampleQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleQuality::Valid => write!(f, "valid"),
            SampleQuality::NonPositiveContinuum => write!(f, "non_positive_continuum"),
            SampleQuality::NonFiniteRatio => write!(f, "non_finite_ratio"),
        }
    }
}

/// One continuum-removed sample. Flagged samples hold `y = NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    /// Continuum value the original intensity was divided by.
    pub continuum: f64,
    pub quality: SampleQuality,
}

/// Original x-coordinates with y replaced by `original / continuum`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContinuumRemovedSeries {
    pub samples: Vec<Sample>,
}

impl ContinuumRemovedSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn flagged(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter().filter(|s| s.quality.is_flagged())
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged().count()
    }

    /// Bitwise equality, treating NaN sentinels as equal to themselves.
    #[cfg(test)]
    pub fn bit_identical(&self, other: &Self) -> bool {
        self.samples.len() == other.samples.len()
            && self.samples.iter().zip(&other.samples).all(|(a, b)| {
                a.x.to_bits() == b.x.to_bits()
                    && a.y.to_bits() == b.y.to_bits()
                    && a.continuum.to_bits() == b.continuum.to_bits()
                    && a.quality == b.quality
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_past_capacity() {
        let mut seq = PointSequence::with_capacity(2);
        seq.push(Point::new(1.0, 1.0)).unwrap();
        seq.push(Point::new(2.0, 1.0)).unwrap();
        let err = seq.push(Point::new(3.0, 1.0)).unwrap_err();
        assert_eq!(err, ContinuumError::CapacityExceeded { max: 2 });
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn from_points_checks_capacity() {
        let pts = vec![Point::new(1.0, 1.0); 3];
        assert!(PointSequence::from_points(pts.clone(), 3).is_ok());
        assert!(PointSequence::from_points(pts, 2)
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn sortedness_check() {
        let seq = PointSequence::from_points(
            vec![(1.0, 0.0).into(), (1.0, 2.0).into(), (3.0, 1.0).into()],
            10,
        )
        .unwrap();
        assert!(seq.is_sorted_by_x());

        let seq = PointSequence::from_points(vec![(2.0, 0.0).into(), (1.0, 2.0).into()], 10)
            .unwrap();
        assert!(!seq.is_sorted_by_x());
    }

    #[test]
    fn hull_sorts_by_x() {
        let mut hull = Hull {
            points: vec![(4.0, 6.0).into(), (1.0, 2.0).into(), (2.0, 5.0).into()],
        };
        hull.sort_by_x();
        let xs: Vec<f64> = hull.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn flagged_samples_are_counted() {
        let series = ContinuumRemovedSeries {
            samples: vec![
                Sample { x: 1.0, y: 1.0, continuum: 2.0, quality: SampleQuality::Valid },
                Sample {
                    x: 2.0,
                    y: f64::NAN,
                    continuum: 0.0,
                    quality: SampleQuality::NonPositiveContinuum,
                },
            ],
        };
        assert_eq!(series.flagged_count(), 1);
        assert!(series.bit_identical(&series.clone()));
    }
}
