use std::{fmt, str::FromStr};

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Preconditioner applied when the linear solver is iterative.
///
/// Direct solvers take no preconditioner; [`Config::resolve`](super::Config::resolve)
/// forces [`Preconditioner::None`] for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(rename_all = "kebab-case"))]
pub enum Preconditioner {
    /// No preconditioning.
    None,
    /// Band-block-diagonal approximation of the jacobian.
    BandBlockDiagonal,
}

impl Preconditioner {
    fn as_str(&self) -> &'static str {
        match self {
            Preconditioner::None => "none",
            Preconditioner::BandBlockDiagonal => "band-block-diagonal",
        }
    }
}

impl fmt::Display for Preconditioner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preconditioner {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Preconditioner::None),
            "band-block-diagonal" => Ok(Preconditioner::BandBlockDiagonal),
            _ => Err(ConfigError::UnknownPreconditioner(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips() {
        for preconditioner in [Preconditioner::None, Preconditioner::BandBlockDiagonal] {
            let parsed: Preconditioner = preconditioner.to_string().parse().unwrap();
            assert_eq!(parsed, preconditioner);
        }
    }

    #[test]
    fn rejects_unknown_preconditioners() {
        for s in ["", "BBDP", "jacobi", "ilu"] {
            let err = s.parse::<Preconditioner>().unwrap_err();
            assert!(matches!(err, ConfigError::UnknownPreconditioner(ref bad) if bad == s));
        }
    }
}
