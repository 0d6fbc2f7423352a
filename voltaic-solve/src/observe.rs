//! Post-hoc observation of solver trajectories.
//!
//! The integrator backend stores states (and optionally their time
//! derivatives) at its own internal time points. This module evaluates
//! output variables over those stored points, and reconstructs the state at
//! arbitrary times by cubic Hermite interpolation so variables can be
//! observed on a dense output grid without re-solving.

mod entries;
mod error;
mod hermite;
mod processed;

pub use entries::Entries;
pub use error::Error;
pub use processed::ProcessedVariable;

use voltaic_core::{Solution, StateVariable};

/// Evaluates one variable function per trajectory segment at every stored
/// time point.
///
/// Segments of a stitched trajectory may come from different model
/// configurations, so each segment carries its own variable function.
/// Output columns follow storage order: all of the first segment's time
/// points, then the next segment's, and so on. Shared boundary times appear
/// once per segment that stores them.
///
/// # Errors
///
/// Returns an error if the variable functions do not match the segments or
/// the requested shape, or if a variable evaluation fails.
pub fn observe<V: StateVariable>(
    solution: &Solution,
    variables: &[V],
    shape: &[usize],
) -> Result<Entries, Error> {
    check_variables(solution, variables, shape)?;

    let mut entries = Entries::new(shape.to_vec(), solution.n_times());
    let mut col = 0;
    for (segment, variable) in solution.segments().iter().zip(variables) {
        for (i, &t) in segment.times().iter().enumerate() {
            variable
                .eval(t, segment.state_at(i), segment.inputs(), entries.column_mut(col))
                .map_err(|e| Error::Variable(Box::new(e)))?;
            col += 1;
        }
    }

    Ok(entries)
}

/// Evaluates variable functions at arbitrary times using Hermite dense
/// output.
///
/// For each requested time the covering segment is located, the state is
/// reconstructed by cubic Hermite interpolation from the stored `(y, yp)`
/// columns, and the segment's variable function is evaluated at the
/// reconstructed state. Times past the final stored time extrapolate with
/// the final interval's polynomial.
///
/// # Errors
///
/// Returns an error if the variable functions do not match the segments or
/// the requested shape, if `t_interp` is empty, non-finite, unsorted, or
/// starts before the solution's initial time, if any segment lacks
/// derivatives, or if a variable evaluation fails.
pub fn observe_interp<V: StateVariable>(
    t_interp: &[f64],
    solution: &Solution,
    variables: &[V],
    shape: &[usize],
) -> Result<Entries, Error> {
    check_variables(solution, variables, shape)?;
    check_times(t_interp, solution)?;

    if !solution.supports_hermite() {
        return Err(Error::DerivativesUnavailable);
    }

    let mut entries = Entries::new(shape.to_vec(), t_interp.len());
    let mut y = vec![0.0; solution.n_states()];
    for (col, &t) in t_interp.iter().enumerate() {
        let index = solution.locate(t);
        let segment = &solution.segments()[index];
        hermite::interpolate_state(segment, t, &mut y)?;
        variables[index]
            .eval(t, &y, segment.inputs(), entries.column_mut(col))
            .map_err(|e| Error::Variable(Box::new(e)))?;
    }

    Ok(entries)
}

fn check_variables<V: StateVariable>(
    solution: &Solution,
    variables: &[V],
    shape: &[usize],
) -> Result<(), Error> {
    let expected = solution.segments().len();
    if variables.len() != expected {
        return Err(Error::VariableCountMismatch {
            expected,
            actual: variables.len(),
        });
    }

    let size: usize = shape.iter().product();
    if shape.is_empty() || size == 0 {
        return Err(Error::EmptyShape);
    }

    for variable in variables {
        if variable.size() != size {
            return Err(Error::SizeMismatch {
                expected: size,
                actual: variable.size(),
            });
        }
    }

    Ok(())
}

fn check_times(t_interp: &[f64], solution: &Solution) -> Result<(), Error> {
    if t_interp.is_empty() {
        return Err(Error::NoTimes);
    }

    for &value in t_interp {
        if !value.is_finite() {
            return Err(Error::NonFiniteTime { value });
        }
    }

    if let Some(index) = t_interp.windows(2).position(|w| w[1] < w[0]) {
        return Err(Error::UnsortedTimes { index: index + 1 });
    }

    let start = solution.first_time();
    if t_interp[0] < start {
        return Err(Error::TimeBeforeStart {
            t: t_interp[0],
            start,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use voltaic_core::Segment;

    /// Copies the state vector straight through.
    struct Identity {
        n: usize,
    }
    impl StateVariable for Identity {
        type Error = Infallible;

        fn size(&self) -> usize {
            self.n
        }

        fn eval(
            &self,
            _t: f64,
            y: &[f64],
            _inputs: &[f64],
            out: &mut [f64],
        ) -> Result<(), Self::Error> {
            out.copy_from_slice(y);
            Ok(())
        }
    }

    /// Scales the first state by the first input parameter.
    struct ScaledFirstState;
    impl StateVariable for ScaledFirstState {
        type Error = Infallible;

        fn size(&self) -> usize {
            1
        }

        fn eval(
            &self,
            _t: f64,
            y: &[f64],
            inputs: &[f64],
            out: &mut [f64],
        ) -> Result<(), Self::Error> {
            out[0] = inputs[0] * y[0];
            Ok(())
        }
    }

    fn cubic_segment(ts: &[f64], inputs: Vec<f64>) -> Segment {
        let ys = ts.iter().map(|&t| t.powi(3)).collect();
        let yps = ts.iter().map(|&t| 3.0 * t * t).collect();
        Segment::new(ts.to_vec(), ys, Some(yps), inputs, 1).expect("valid segment")
    }

    fn cubic_solution() -> Solution {
        Solution::new(vec![
            cubic_segment(&[0.0, 1.0, 2.0], vec![1.0]),
            cubic_segment(&[2.0, 3.0, 5.0], vec![1.0]),
        ])
        .expect("valid solution")
    }

    #[test]
    fn observes_stored_columns_in_segment_order() {
        let solution = cubic_solution();
        let variables = [Identity { n: 1 }, Identity { n: 1 }];

        let entries = observe(&solution, &variables, &[1]).expect("observation succeeds");

        assert_eq!(entries.n_times(), 6);
        // The shared boundary time appears once per segment.
        assert_eq!(entries.data(), &[0.0, 1.0, 8.0, 8.0, 27.0, 125.0]);
    }

    #[test]
    fn observe_passes_segment_inputs_through() {
        let solution = Solution::new(vec![
            cubic_segment(&[0.0, 1.0], vec![2.0]),
            cubic_segment(&[1.0, 2.0], vec![10.0]),
        ])
        .expect("valid solution");
        let variables = [ScaledFirstState, ScaledFirstState];

        let entries = observe(&solution, &variables, &[1]).expect("observation succeeds");
        assert_eq!(entries.data(), &[0.0, 2.0, 10.0, 80.0]);
    }

    #[test]
    fn interpolates_cubic_trajectory_exactly() {
        let solution = cubic_solution();
        let variables = [Identity { n: 1 }, Identity { n: 1 }];

        let t_interp = [0.3, 0.9, 1.5, 2.0, 2.4, 4.9];
        let entries = observe_interp(&t_interp, &solution, &variables, &[1])
            .expect("interpolation succeeds");

        assert_eq!(entries.n_times(), t_interp.len());
        for (col, &t) in t_interp.iter().enumerate() {
            assert_relative_eq!(
                entries.column(col)[0],
                t.powi(3),
                epsilon = 1e-10,
                max_relative = 1e-10
            );
        }
    }

    #[test]
    fn interpolation_extrapolates_past_final_time() {
        let solution = cubic_solution();
        let variables = [Identity { n: 1 }, Identity { n: 1 }];

        let entries = observe_interp(&[5.5], &solution, &variables, &[1])
            .expect("interpolation succeeds");
        assert_relative_eq!(
            entries.column(0)[0],
            5.5f64.powi(3),
            epsilon = 1e-9,
            max_relative = 1e-12
        );
    }

    #[test]
    fn rejects_variable_count_mismatch() {
        let solution = cubic_solution();
        let result = observe(&solution, &[Identity { n: 1 }], &[1]);
        assert!(matches!(
            result,
            Err(Error::VariableCountMismatch {
                expected: 2,
                actual: 1,
            })
        ));
    }

    #[test]
    fn rejects_shape_size_mismatch() {
        let solution = cubic_solution();
        let variables = [Identity { n: 1 }, Identity { n: 1 }];

        let result = observe(&solution, &variables, &[2]);
        assert!(matches!(
            result,
            Err(Error::SizeMismatch {
                expected: 2,
                actual: 1,
            })
        ));

        let result = observe(&solution, &variables, &[]);
        assert!(matches!(result, Err(Error::EmptyShape)));
    }

    #[test]
    fn rejects_bad_interpolation_times() {
        let solution = cubic_solution();
        let variables = [Identity { n: 1 }, Identity { n: 1 }];

        let result = observe_interp(&[], &solution, &variables, &[1]);
        assert!(matches!(result, Err(Error::NoTimes)));

        let result = observe_interp(&[0.5, 0.2], &solution, &variables, &[1]);
        assert!(matches!(result, Err(Error::UnsortedTimes { index: 1 })));

        let result = observe_interp(&[0.5, f64::NAN], &solution, &variables, &[1]);
        assert!(matches!(result, Err(Error::NonFiniteTime { .. })));

        let result = observe_interp(&[-1.0, 0.5], &solution, &variables, &[1]);
        assert!(matches!(result, Err(Error::TimeBeforeStart { .. })));
    }

    #[test]
    fn duplicate_interpolation_times_are_allowed() {
        let solution = cubic_solution();
        let variables = [Identity { n: 1 }, Identity { n: 1 }];

        let entries = observe_interp(&[1.0, 1.0], &solution, &variables, &[1])
            .expect("interpolation succeeds");
        assert_relative_eq!(entries.column(0)[0], 1.0);
        assert_relative_eq!(entries.column(1)[0], 1.0);
    }

    #[test]
    fn interpolation_requires_derivatives() {
        let segment =
            Segment::new(vec![0.0, 1.0], vec![0.0, 1.0], None, vec![], 1).expect("valid segment");
        let solution = Solution::new(vec![segment]).expect("valid solution");

        let result = observe_interp(&[0.5], &solution, &[Identity { n: 1 }], &[1]);
        assert!(matches!(result, Err(Error::DerivativesUnavailable)));
    }
}
