/// Observed output entries for one variable over a set of time points.
///
/// Storage is column-major: one column of `shape.iter().product()` values
/// per time point, with the time axis last. The per-time shape is carried
/// so callers can reshape multi-dimensional variables without re-deriving
/// it from the variable functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Entries {
    shape: Vec<usize>,
    n_times: usize,
    data: Vec<f64>,
}

impl Entries {
    pub(super) fn new(shape: Vec<usize>, n_times: usize) -> Self {
        let size = shape.iter().product::<usize>();
        Self {
            shape,
            n_times,
            data: vec![0.0; size * n_times],
        }
    }

    /// Returns the per-time shape of the variable.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the number of time points observed.
    #[must_use]
    pub fn n_times(&self) -> usize {
        self.n_times
    }

    /// Returns the flat number of entries per time point.
    #[must_use]
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    /// Returns the column of entries for one time point.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn column(&self, index: usize) -> &[f64] {
        let size = self.size();
        &self.data[index * size..(index + 1) * size]
    }

    pub(super) fn column_mut(&mut self, index: usize) -> &mut [f64] {
        let size = self.size();
        &mut self.data[index * size..(index + 1) * size]
    }

    /// Returns the full column-major data buffer.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.data
    }
}
