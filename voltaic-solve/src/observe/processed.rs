use std::cmp::Ordering;

use voltaic_core::{Solution, StateVariable};

use super::{Entries, Error, check_variables, observe, observe_interp};

/// Post-processes one output variable of a solved trajectory.
///
/// Raw observation evaluates the variable at the stored time points; queries
/// at other times reconstruct the state with Hermite dense output first.
/// Query times are compared against the stored points so an exact replay of
/// the solve grid never pays for interpolation.
pub struct ProcessedVariable<'a, V> {
    solution: &'a Solution,
    variables: Vec<V>,
    shape: Vec<usize>,
}

impl<'a, V: StateVariable> ProcessedVariable<'a, V> {
    /// Creates a processed variable over a solved trajectory.
    ///
    /// Takes one variable function per segment, all producing
    /// `shape.iter().product()` entries per time point.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable functions do not match the segments
    /// or the requested shape.
    pub fn new(
        solution: &'a Solution,
        variables: Vec<V>,
        shape: Vec<usize>,
    ) -> Result<Self, Error> {
        check_variables(solution, &variables, &shape)?;
        Ok(Self {
            solution,
            variables,
            shape,
        })
    }

    /// Observes the variable at the stored time points.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable evaluation fails.
    pub fn entries(&self) -> Result<Entries, Error> {
        observe(self.solution, &self.variables, &self.shape)
    }

    /// Observes the variable at arbitrary query times.
    ///
    /// Query times matching the stored points exactly take the raw path.
    /// Unsorted queries are evaluated in sorted order and the output columns
    /// are restored to query order.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`observe_interp`], or raw observation
    /// errors when the query matches the stored grid.
    pub fn at(&self, t: &[f64]) -> Result<Entries, Error> {
        if self.matches_stored(t) {
            return self.entries();
        }

        if is_sorted(t) {
            return observe_interp(t, self.solution, &self.variables, &self.shape);
        }

        let mut order: Vec<usize> = (0..t.len()).collect();
        order.sort_by(|&a, &b| t[a].partial_cmp(&t[b]).unwrap_or(Ordering::Equal));
        let sorted: Vec<f64> = order.iter().map(|&i| t[i]).collect();

        let computed = observe_interp(&sorted, self.solution, &self.variables, &self.shape)?;

        let mut entries = Entries::new(self.shape.clone(), t.len());
        for (k, &i) in order.iter().enumerate() {
            entries.column_mut(i).copy_from_slice(computed.column(k));
        }
        Ok(entries)
    }

    #[allow(clippy::float_cmp)]
    fn matches_stored(&self, t: &[f64]) -> bool {
        if t.len() != self.solution.n_times() {
            return false;
        }
        let stored = self
            .solution
            .segments()
            .iter()
            .flat_map(|segment| segment.times().iter().copied());
        t.iter().copied().zip(stored).all(|(a, b)| a == b)
    }
}

fn is_sorted(t: &[f64]) -> bool {
    t.windows(2).all(|w| w[0] <= w[1])
}
