use std::{fmt, str::FromStr};

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// The linear solver family used inside each Newton iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(rename_all = "kebab-case"))]
pub enum LinearSolver {
    /// Dense LU factorization.
    Dense,
    /// KLU sparse direct factorization.
    Klu,
    /// Batched sparse QR factorization on the GPU backend.
    BatchedQr,
    /// Banded direct factorization.
    Band,
    /// Scaled preconditioned bi-conjugate gradient, stabilized.
    Spbcgs,
    /// Scaled preconditioned flexible GMRES.
    Spfgmr,
    /// Scaled preconditioned GMRES.
    Spgmr,
    /// Scaled preconditioned transpose-free QMR.
    Sptfqmr,
}

impl LinearSolver {
    /// Returns true for the Krylov solvers, which iterate to an approximate
    /// solution instead of factoring the matrix.
    #[must_use]
    pub fn is_iterative(&self) -> bool {
        matches!(
            self,
            LinearSolver::Spbcgs | LinearSolver::Spfgmr | LinearSolver::Spgmr | LinearSolver::Sptfqmr
        )
    }

    fn as_str(&self) -> &'static str {
        match self {
            LinearSolver::Dense => "dense",
            LinearSolver::Klu => "klu",
            LinearSolver::BatchedQr => "batched-qr",
            LinearSolver::Band => "band",
            LinearSolver::Spbcgs => "spbcgs",
            LinearSolver::Spfgmr => "spfgmr",
            LinearSolver::Spgmr => "spgmr",
            LinearSolver::Sptfqmr => "sptfqmr",
        }
    }
}

impl fmt::Display for LinearSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinearSolver {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dense" => Ok(LinearSolver::Dense),
            "klu" => Ok(LinearSolver::Klu),
            "batched-qr" => Ok(LinearSolver::BatchedQr),
            "band" => Ok(LinearSolver::Band),
            "spbcgs" => Ok(LinearSolver::Spbcgs),
            "spfgmr" => Ok(LinearSolver::Spfgmr),
            "spgmr" => Ok(LinearSolver::Spgmr),
            "sptfqmr" => Ok(LinearSolver::Sptfqmr),
            _ => Err(ConfigError::UnknownLinearSolver(s.to_owned())),
        }
    }
}
