use thiserror::Error;

// ---------------------------------------------------------------------------
// Core pipeline errors
// ---------------------------------------------------------------------------

/// Failures surfaced by the hull / continuum pipeline.
///
/// Geometric edge cases (zero-width segments, non-positive interpolation)
/// are recovered inside the algorithms and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContinuumError {
    #[error("invalid input: need at least {min} point(s), got {got}")]
    TooFewPoints { got: usize, min: usize },

    /// More bands than the configured maximum were supplied.
    #[error("invalid input: more than {max} bands")]
    CapacityExceeded { max: usize },

    /// The gift-wrapping walk failed to reach the max-x point within its
    /// step budget (floating-point tie degeneracy).
    #[error("hull walk did not reach the max-x point after {steps} steps")]
    HullWalkDiverged { steps: usize },
}

impl ContinuumError {
    /// Whether the error is a rejection of the input size.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ContinuumError::TooFewPoints { .. } | ContinuumError::CapacityExceeded { .. }
        )
    }
}
