use thiserror::Error;

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

/// Errors that can occur when validating or broadcasting a [`Tolerance`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ToleranceError {
    /// A tolerance entry is zero, negative, or non-finite.
    #[error("tolerance entries must be finite and positive (got {value})")]
    NotPositive { value: f64 },
    /// A per-state tolerance has no entries.
    #[error("per-state tolerance is empty")]
    Empty,
    /// A per-state tolerance does not match the state vector length.
    #[error("per-state tolerance has {actual} entries but the state vector has {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// An absolute tolerance, shared by every state or given per state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde-derive", serde(untagged))]
pub enum Tolerance {
    /// One tolerance applied to every state.
    Scalar(f64),
    /// One tolerance per entry of the state vector.
    PerState(Vec<f64>),
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Scalar(1e-6)
    }
}

impl Tolerance {
    /// Validates that every entry is finite and positive.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is zero, negative, or non-finite, or if
    /// a per-state tolerance is empty.
    pub fn validate(&self) -> Result<(), ToleranceError> {
        match self {
            Tolerance::Scalar(value) => check_entry(*value),
            Tolerance::PerState(values) => {
                if values.is_empty() {
                    return Err(ToleranceError::Empty);
                }
                values.iter().try_for_each(|&value| check_entry(value))
            }
        }
    }

    /// Expands the tolerance to one entry per state.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is invalid or a per-state tolerance
    /// does not have exactly `n_states` entries.
    pub fn per_state(&self, n_states: usize) -> Result<Vec<f64>, ToleranceError> {
        self.validate()?;
        match self {
            Tolerance::Scalar(value) => Ok(vec![*value; n_states]),
            Tolerance::PerState(values) if values.len() == n_states => Ok(values.clone()),
            Tolerance::PerState(values) => Err(ToleranceError::LengthMismatch {
                expected: n_states,
                actual: values.len(),
            }),
        }
    }
}

fn check_entry(value: f64) -> Result<(), ToleranceError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ToleranceError::NotPositive { value })
    }
}
