#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use super::{ConfigError, Jacobian, LinearSolver, Preconditioner, Tolerance};

/// Configuration for the implicit DAE integrator backend.
///
/// Covers the backend's full option surface: the jacobian representation,
/// linear solver family, and preconditioner, solver tolerances, and the
/// iteration limits for the main integration loop, the initial-condition
/// calculation, and the linear solver interface. Only some combinations of
/// jacobian, linear solver, and preconditioner make sense together;
/// [`Config::validate`] enforces the compatibility matrix and
/// [`Config::resolve`] returns the effective configuration the backend
/// receives.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(default))]
pub struct Config {
    /// Jacobian representation.
    pub jacobian: Jacobian,
    /// Linear solver family.
    pub linear_solver: LinearSolver,
    /// Preconditioner for iterative linear solvers.
    pub preconditioner: Preconditioner,
    /// Half-bandwidth of the approximate jacobian the preconditioner builds.
    pub precon_half_bandwidth: usize,
    /// Half-bandwidth of the approximate jacobian the preconditioner keeps.
    pub precon_half_bandwidth_keep: usize,
    /// Number of threads the backend may use.
    pub num_threads: usize,
    /// Print backend statistics after every solve.
    pub print_stats: bool,

    /// Relative tolerance.
    pub rtol: f64,
    /// Absolute tolerance, scalar or per state.
    pub atol: Tolerance,

    /// Maximum order of the BDF method, between 1 and 5.
    pub max_order_bdf: usize,
    /// Maximum number of internal steps per solve.
    pub max_num_steps: usize,
    /// Initial step size; 0 lets the backend choose.
    pub dt_init: f64,
    /// Maximum step size; 0 leaves the step size unbounded.
    pub dt_max: f64,
    /// Maximum error test failures per step attempt.
    pub max_error_test_failures: usize,
    /// Maximum nonlinear (Newton) iterations per step.
    pub max_nonlinear_iterations: usize,
    /// Maximum nonlinear convergence failures per step attempt.
    pub max_convergence_failures: usize,
    /// Safety factor in the nonlinear convergence test.
    pub nonlinear_convergence_coefficient: f64,
    /// Suppress local error testing on algebraic variables.
    pub suppress_algebraic_error: bool,

    /// Compute consistent initial conditions before integrating.
    pub calc_ic: bool,
    /// Safety factor in the initial-condition convergence test.
    pub nonlinear_convergence_coefficient_ic: f64,
    /// Number of steps over which the initial conditions are relaxed.
    pub max_num_steps_ic: usize,
    /// Maximum jacobian evaluations during the initial-condition calculation.
    pub max_number_jacobians_ic: usize,
    /// Maximum Newton iterations during the initial-condition calculation.
    pub max_number_iterations_ic: usize,
    /// Maximum linesearch backtracks per initial-condition iteration.
    pub max_linesearch_backtracks_ic: usize,
    /// Disable the linesearch during the initial-condition calculation.
    pub linesearch_off_ic: bool,

    /// Maximum iterations of an iterative linear solver.
    pub linsol_max_iterations: usize,
    /// Scale the linear solve by the current step coefficient.
    pub linear_solution_scaling: bool,
    /// Ratio between the linear and nonlinear convergence tolerances.
    pub epsilon_linear_tolerance: f64,
    /// Increment factor for difference-quotient jacobian-vector products.
    pub increment_factor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jacobian: Jacobian::Sparse,
            linear_solver: LinearSolver::Klu,
            preconditioner: Preconditioner::BandBlockDiagonal,
            precon_half_bandwidth: 5,
            precon_half_bandwidth_keep: 5,
            num_threads: 1,
            print_stats: false,

            rtol: 1e-6,
            atol: Tolerance::default(),

            max_order_bdf: 5,
            max_num_steps: 100_000,
            dt_init: 0.0,
            dt_max: 0.0,
            max_error_test_failures: 10,
            max_nonlinear_iterations: 40,
            max_convergence_failures: 100,
            nonlinear_convergence_coefficient: 0.33,
            suppress_algebraic_error: false,

            calc_ic: true,
            nonlinear_convergence_coefficient_ic: 0.0033,
            max_num_steps_ic: 50,
            max_number_jacobians_ic: 40,
            max_number_iterations_ic: 100,
            max_linesearch_backtracks_ic: 100,
            linesearch_off_ic: false,

            linsol_max_iterations: 5,
            linear_solution_scaling: true,
            epsilon_linear_tolerance: 0.05,
            increment_factor: 1.0,
        }
    }
}

impl Config {
    /// Returns true if the selected linear solver is iterative.
    #[must_use]
    pub fn is_iterative(&self) -> bool {
        self.linear_solver.is_iterative()
    }

    /// Checks cross-field compatibility and numeric ranges.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending jacobian/linear-solver pair if
    /// the combination is outside the compatibility matrix, or the offending
    /// option if a numeric value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_compatibility()?;
        self.check_numeric()?;
        self.atol.validate()?;
        Ok(())
    }

    /// Validates and returns the effective configuration.
    ///
    /// Direct linear solvers take no preconditioner, so the preconditioner
    /// is forced to [`Preconditioner::None`] unless the solver is iterative.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Config::validate`].
    pub fn resolve(self) -> Result<Self, ConfigError> {
        self.validate()?;
        let preconditioner = if self.is_iterative() {
            self.preconditioner
        } else {
            Preconditioner::None
        };
        Ok(Self {
            preconditioner,
            ..self
        })
    }

    fn check_compatibility(&self) -> Result<(), ConfigError> {
        let jacobian = self.jacobian;
        let linear_solver = self.linear_solver;

        match (jacobian, linear_solver) {
            (Jacobian::Dense | Jacobian::None, LinearSolver::Dense)
            | (Jacobian::Sparse, LinearSolver::Klu | LinearSolver::BatchedQr)
            | (Jacobian::Banded, LinearSolver::Band) => Ok(()),
            (Jacobian::Sparse | Jacobian::MatrixFree, ls) if ls.is_iterative() => Ok(()),
            (Jacobian::Banded, linear_solver) => Err(ConfigError::BandedJacobianSolver {
                jacobian,
                linear_solver,
            }),
            (Jacobian::Sparse, linear_solver) => Err(ConfigError::SparseJacobianSolver {
                jacobian,
                linear_solver,
            }),
            (Jacobian::MatrixFree, linear_solver) => Err(ConfigError::MatrixFreeJacobianSolver {
                jacobian,
                linear_solver,
            }),
            (Jacobian::None, linear_solver) => Err(ConfigError::MissingJacobianSolver {
                jacobian,
                linear_solver,
            }),
            (Jacobian::Dense, linear_solver) => Err(ConfigError::IncompatibleLinearSolver {
                jacobian,
                linear_solver,
            }),
        }
    }

    fn check_numeric(&self) -> Result<(), ConfigError> {
        check_positive("rtol", self.rtol)?;
        check_non_negative("dt_init", self.dt_init)?;
        check_non_negative("dt_max", self.dt_max)?;
        check_positive(
            "nonlinear_convergence_coefficient",
            self.nonlinear_convergence_coefficient,
        )?;
        check_positive(
            "nonlinear_convergence_coefficient_ic",
            self.nonlinear_convergence_coefficient_ic,
        )?;
        check_positive("epsilon_linear_tolerance", self.epsilon_linear_tolerance)?;
        check_positive("increment_factor", self.increment_factor)?;

        if self.max_order_bdf == 0 || self.max_order_bdf > 5 {
            return Err(ConfigError::InvalidOption {
                name: "max_order_bdf",
                reason: "must be between 1 and 5",
            });
        }

        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidOption {
            name,
            reason: "must be finite and positive",
        })
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidOption {
            name,
            reason: "must be finite and non-negative",
        })
    }
}
