/// A callable that maps solver state to an output variable.
///
/// Implementations stand in for the compiled function objects the integrator
/// backend evaluates: given a time, the state vector, and the parameter
/// vector of the trajectory segment being observed, they produce a fixed
/// number of output entries. Observation routines call a variable once per
/// time point and lay the results out column by column.
pub trait StateVariable {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Number of entries this variable produces per time point.
    fn size(&self) -> usize;

    /// Evaluates the variable at time `t`.
    ///
    /// Writes exactly [`size`](Self::size) entries into `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the evaluation fails.
    fn eval(&self, t: f64, y: &[f64], inputs: &[f64], out: &mut [f64]) -> Result<(), Self::Error>;
}
