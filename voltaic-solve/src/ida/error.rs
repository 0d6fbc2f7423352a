use thiserror::Error;

use super::{Jacobian, LinearSolver, ToleranceError};

/// Errors produced when parsing or validating a solver [`Config`](super::Config).
///
/// Incompatible-option variants carry both the jacobian and the linear
/// solver so the message names the full offending combination, along with
/// the fix the backend supports.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The jacobian string is not a recognized kind.
    #[error(
        "unknown jacobian kind \"{0}\"; expected one of \"sparse\", \"banded\", \"dense\", \
         \"matrix-free\", or \"none\""
    )]
    UnknownJacobian(String),

    /// The linear solver string is not a recognized family.
    #[error(
        "unknown linear solver \"{0}\"; expected one of \"dense\", \"klu\", \"batched-qr\", \
         \"band\", \"spbcgs\", \"spfgmr\", \"spgmr\", or \"sptfqmr\""
    )]
    UnknownLinearSolver(String),

    /// The preconditioner string is not a recognized kind.
    #[error("unknown preconditioner \"{0}\"; use \"band-block-diagonal\" or \"none\"")]
    UnknownPreconditioner(String),

    /// A banded jacobian was paired with a non-banded linear solver.
    #[error(
        "incompatible options: jacobian = \"{jacobian}\", linear solver = \"{linear_solver}\"; \
         a banded jacobian requires the \"band\" linear solver"
    )]
    BandedJacobianSolver {
        jacobian: Jacobian,
        linear_solver: LinearSolver,
    },

    /// A sparse jacobian was paired with a dense or banded linear solver.
    #[error(
        "incompatible options: jacobian = \"{jacobian}\", linear solver = \"{linear_solver}\"; \
         a sparse jacobian requires \"klu\", \"batched-qr\", or an iterative linear solver"
    )]
    SparseJacobianSolver {
        jacobian: Jacobian,
        linear_solver: LinearSolver,
    },

    /// A matrix-free jacobian was paired with a direct linear solver.
    #[error(
        "incompatible options: jacobian = \"{jacobian}\", linear solver = \"{linear_solver}\"; \
         a matrix-free jacobian requires one of the iterative linear solvers \"spbcgs\", \
         \"spfgmr\", \"spgmr\", or \"sptfqmr\""
    )]
    MatrixFreeJacobianSolver {
        jacobian: Jacobian,
        linear_solver: LinearSolver,
    },

    /// No jacobian was supplied but the linear solver needs one.
    #[error(
        "incompatible options: jacobian = \"{jacobian}\", linear solver = \"{linear_solver}\"; \
         without a jacobian use the \"dense\" linear solver"
    )]
    MissingJacobianSolver {
        jacobian: Jacobian,
        linear_solver: LinearSolver,
    },

    /// A remaining jacobian/linear-solver pairing the backend does not support.
    #[error("incompatible options: jacobian = \"{jacobian}\", linear solver = \"{linear_solver}\"")]
    IncompatibleLinearSolver {
        jacobian: Jacobian,
        linear_solver: LinearSolver,
    },

    /// A numeric option is out of range.
    #[error("invalid {name}: {reason}")]
    InvalidOption {
        name: &'static str,
        reason: &'static str,
    },

    /// The absolute tolerance is invalid.
    #[error("invalid absolute tolerance")]
    AbsoluteTolerance(#[from] ToleranceError),
}
