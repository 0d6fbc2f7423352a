use thiserror::Error;

/// Errors that can occur when constructing a [`Segment`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SegmentError {
    /// The segment has no time points.
    #[error("segment has no time points")]
    Empty,
    /// A time value is not finite.
    #[error("non-finite time value {value} at index {index}")]
    NonFiniteTime { index: usize, value: f64 },
    /// Times are not strictly increasing.
    #[error("segment times must be strictly increasing (violated at index {index})")]
    UnsortedTimes { index: usize },
    /// The state storage does not match `n_states * n_times`.
    #[error("state storage has {actual} entries but {expected} are required")]
    StateLengthMismatch { expected: usize, actual: usize },
    /// The derivative storage does not match `n_states * n_times`.
    #[error("derivative storage has {actual} entries but {expected} are required")]
    DerivativeLengthMismatch { expected: usize, actual: usize },
}

/// One contiguous piece of a solver trajectory.
///
/// States are stored column-major: `n_states` rows with one column per time
/// point, matching the layout the integrator backend hands back. Derivative
/// columns are optional; when present they enable Hermite dense output.
/// Each segment carries its own parameter vector, since the segments of a
/// stitched trajectory may come from different model configurations.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    ts: Vec<f64>,
    ys: Vec<f64>,
    yps: Option<Vec<f64>>,
    inputs: Vec<f64>,
    n_states: usize,
}

impl Segment {
    /// Creates a validated segment.
    ///
    /// # Errors
    ///
    /// Returns an error if `ts` is empty, contains non-finite values, or is
    /// not strictly increasing, or if `ys`/`yps` do not hold exactly
    /// `n_states` entries per time point.
    pub fn new(
        ts: Vec<f64>,
        ys: Vec<f64>,
        yps: Option<Vec<f64>>,
        inputs: Vec<f64>,
        n_states: usize,
    ) -> Result<Self, SegmentError> {
        if ts.is_empty() {
            return Err(SegmentError::Empty);
        }

        for (index, &value) in ts.iter().enumerate() {
            if !value.is_finite() {
                return Err(SegmentError::NonFiniteTime { index, value });
            }
        }

        if let Some(index) = ts.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SegmentError::UnsortedTimes { index: index + 1 });
        }

        let expected = n_states * ts.len();
        if ys.len() != expected {
            return Err(SegmentError::StateLengthMismatch {
                expected,
                actual: ys.len(),
            });
        }

        if let Some(yps) = &yps {
            if yps.len() != expected {
                return Err(SegmentError::DerivativeLengthMismatch {
                    expected,
                    actual: yps.len(),
                });
            }
        }

        Ok(Self {
            ts,
            ys,
            yps,
            inputs,
            n_states,
        })
    }

    /// Returns the stored time points.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.ts
    }

    /// Returns the number of stored time points.
    #[must_use]
    pub fn n_times(&self) -> usize {
        self.ts.len()
    }

    /// Returns the number of states per time point.
    #[must_use]
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Returns the first stored time.
    #[must_use]
    pub fn first_time(&self) -> f64 {
        self.ts[0]
    }

    /// Returns the last stored time.
    #[must_use]
    pub fn last_time(&self) -> f64 {
        self.ts[self.ts.len() - 1]
    }

    /// Returns the state column at a time index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn state_at(&self, index: usize) -> &[f64] {
        &self.ys[index * self.n_states..(index + 1) * self.n_states]
    }

    /// Returns the derivative column at a time index, if derivatives are
    /// stored.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn derivative_at(&self, index: usize) -> Option<&[f64]> {
        self.yps
            .as_ref()
            .map(|yps| &yps[index * self.n_states..(index + 1) * self.n_states])
    }

    /// Returns true if derivative columns are stored.
    #[must_use]
    pub fn has_derivatives(&self) -> bool {
        self.yps.is_some()
    }

    /// Returns the parameter vector for this segment.
    #[must_use]
    pub fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    /// Returns the index `i` of the interval `[ts[i], ts[i+1]]` covering `t`.
    ///
    /// Times before the first point map to the first interval and times past
    /// the last point map to the final interval. A single-point segment has
    /// no interval; index 0 is returned.
    #[must_use]
    pub fn interval_of(&self, t: f64) -> usize {
        let n = self.ts.len();
        if n < 2 {
            return 0;
        }
        let idx = self.ts.partition_point(|&tk| tk <= t);
        idx.saturating_sub(1).min(n - 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn two_state_segment() -> Segment {
        // Two states over three time points, column per time.
        Segment::new(
            vec![0.0, 1.0, 2.0],
            vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0],
            None,
            vec![0.5],
            2,
        )
        .expect("valid segment")
    }

    #[test]
    fn exposes_columns_and_times() {
        let segment = two_state_segment();

        assert_eq!(segment.n_times(), 3);
        assert_eq!(segment.n_states(), 2);
        assert_relative_eq!(segment.first_time(), 0.0);
        assert_relative_eq!(segment.last_time(), 2.0);
        assert_eq!(segment.state_at(1), &[2.0, 20.0]);
        assert_eq!(segment.inputs(), &[0.5]);
        assert!(!segment.has_derivatives());
        assert!(segment.derivative_at(0).is_none());
    }

    #[test]
    fn stores_derivative_columns() {
        let segment = Segment::new(
            vec![0.0, 1.0],
            vec![1.0, 2.0],
            Some(vec![0.1, 0.2]),
            vec![],
            1,
        )
        .expect("valid segment");

        assert!(segment.has_derivatives());
        assert_eq!(segment.derivative_at(1), Some(&[0.2][..]));
    }

    #[test]
    fn rejects_empty_times() {
        let result = Segment::new(vec![], vec![], None, vec![], 1);
        assert!(matches!(result, Err(SegmentError::Empty)));
    }

    #[test]
    fn rejects_non_finite_times() {
        let result = Segment::new(vec![0.0, f64::NAN], vec![1.0, 2.0], None, vec![], 1);
        assert!(matches!(
            result,
            Err(SegmentError::NonFiniteTime { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_unsorted_times() {
        let result = Segment::new(vec![0.0, 2.0, 1.0], vec![1.0, 2.0, 3.0], None, vec![], 1);
        assert!(matches!(
            result,
            Err(SegmentError::UnsortedTimes { index: 2 })
        ));

        let result = Segment::new(vec![0.0, 0.0], vec![1.0, 2.0], None, vec![], 1);
        assert!(matches!(
            result,
            Err(SegmentError::UnsortedTimes { index: 1 })
        ));
    }

    #[test]
    fn rejects_state_length_mismatch() {
        let result = Segment::new(vec![0.0, 1.0], vec![1.0, 2.0, 3.0], None, vec![], 2);
        assert!(matches!(
            result,
            Err(SegmentError::StateLengthMismatch {
                expected: 4,
                actual: 3,
            })
        ));
    }

    #[test]
    fn rejects_derivative_length_mismatch() {
        let result = Segment::new(vec![0.0, 1.0], vec![1.0, 2.0], Some(vec![0.1]), vec![], 1);
        assert!(matches!(
            result,
            Err(SegmentError::DerivativeLengthMismatch {
                expected: 2,
                actual: 1,
            })
        ));
    }

    #[test]
    fn interval_covers_interior_and_boundaries() {
        let segment = two_state_segment();

        assert_eq!(segment.interval_of(0.5), 0);
        assert_eq!(segment.interval_of(1.0), 1);
        assert_eq!(segment.interval_of(1.5), 1);
        // Clamped on both sides.
        assert_eq!(segment.interval_of(-1.0), 0);
        assert_eq!(segment.interval_of(5.0), 1);
    }

    #[test]
    fn interval_of_single_point_segment_is_zero() {
        let segment = Segment::new(vec![1.0], vec![4.0], None, vec![], 1).expect("valid segment");
        assert_eq!(segment.interval_of(3.0), 0);
    }
}
