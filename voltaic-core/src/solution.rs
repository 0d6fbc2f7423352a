use thiserror::Error;

use crate::segment::Segment;

/// Errors that can occur when assembling a [`Solution`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SolutionError {
    /// The solution has no segments.
    #[error("solution has no segments")]
    Empty,
    /// A segment disagrees with the solution on the number of states.
    #[error("segment {index} has {actual} states but the solution has {expected}")]
    StateCountMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    /// A segment starts before the previous one ends.
    #[error("segment {index} starts at {start} before the previous segment ends at {previous_end}")]
    OutOfOrderSegments {
        index: usize,
        start: f64,
        previous_end: f64,
    },
}

/// A full solver trajectory assembled from one or more segments.
///
/// Segments are ordered in time and agree on the number of states. A
/// stitched trajectory typically shares its boundary points: the last time
/// of one segment reappears as the first time of the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    segments: Vec<Segment>,
}

impl Solution {
    /// Assembles a validated solution from ordered segments.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is empty, the segments disagree on the
    /// number of states, or a segment starts before the previous one ends.
    pub fn new(segments: Vec<Segment>) -> Result<Self, SolutionError> {
        let Some(first) = segments.first() else {
            return Err(SolutionError::Empty);
        };

        let n_states = first.n_states();
        for (index, segment) in segments.iter().enumerate().skip(1) {
            if segment.n_states() != n_states {
                return Err(SolutionError::StateCountMismatch {
                    index,
                    expected: n_states,
                    actual: segment.n_states(),
                });
            }
            let previous_end = segments[index - 1].last_time();
            if segment.first_time() < previous_end {
                return Err(SolutionError::OutOfOrderSegments {
                    index,
                    start: segment.first_time(),
                    previous_end,
                });
            }
        }

        Ok(Self { segments })
    }

    /// Returns the segments in time order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of states per time point.
    #[must_use]
    pub fn n_states(&self) -> usize {
        self.segments[0].n_states()
    }

    /// Returns the total number of stored time points across all segments.
    #[must_use]
    pub fn n_times(&self) -> usize {
        self.segments.iter().map(Segment::n_times).sum()
    }

    /// Returns the first stored time.
    #[must_use]
    pub fn first_time(&self) -> f64 {
        self.segments[0].first_time()
    }

    /// Returns the last stored time.
    #[must_use]
    pub fn last_time(&self) -> f64 {
        self.segments[self.segments.len() - 1].last_time()
    }

    /// Returns true if every segment stores derivative columns, which is
    /// what Hermite dense output needs.
    #[must_use]
    pub fn supports_hermite(&self) -> bool {
        self.segments.iter().all(Segment::has_derivatives)
    }

    /// Returns the index of the segment whose time span covers `t`.
    ///
    /// Times past the final segment map to the final segment.
    #[must_use]
    pub fn locate(&self, t: f64) -> usize {
        let last = self.segments.len() - 1;
        self.segments
            .iter()
            .position(|segment| t <= segment.last_time())
            .unwrap_or(last)
    }
}
