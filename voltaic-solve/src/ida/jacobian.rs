use std::{fmt, str::FromStr};

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// How the integrator stores and evaluates the DAE linearization matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(rename_all = "kebab-case"))]
pub enum Jacobian {
    /// Sparse compressed-column storage.
    Sparse,
    /// Banded storage.
    Banded,
    /// Dense storage.
    Dense,
    /// No matrix is formed; only jacobian-vector products are evaluated.
    MatrixFree,
    /// No jacobian is supplied; the backend approximates one by differencing.
    None,
}

impl Jacobian {
    /// Returns true if the backend should allocate sparse matrix storage.
    ///
    /// Matrix-free mode keeps the sparse layout for its residual workspace.
    #[must_use]
    pub fn uses_sparse_matrix(&self) -> bool {
        matches!(self, Jacobian::Sparse | Jacobian::MatrixFree)
    }

    /// Returns true if the backend should allocate banded matrix storage.
    #[must_use]
    pub fn uses_banded_matrix(&self) -> bool {
        matches!(self, Jacobian::Banded)
    }

    fn as_str(&self) -> &'static str {
        match self {
            Jacobian::Sparse => "sparse",
            Jacobian::Banded => "banded",
            Jacobian::Dense => "dense",
            Jacobian::MatrixFree => "matrix-free",
            Jacobian::None => "none",
        }
    }
}

impl fmt::Display for Jacobian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Jacobian {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sparse" => Ok(Jacobian::Sparse),
            "banded" => Ok(Jacobian::Banded),
            "dense" => Ok(Jacobian::Dense),
            "matrix-free" => Ok(Jacobian::MatrixFree),
            "none" => Ok(Jacobian::None),
            _ => Err(ConfigError::UnknownJacobian(s.to_owned())),
        }
    }
}
