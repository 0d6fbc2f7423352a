use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur during trajectory observation.
#[derive(Debug, Error)]
pub enum Error {
    /// The number of variable functions does not match the number of segments.
    #[error("expected one variable function per segment ({expected}), got {actual}")]
    VariableCountMismatch { expected: usize, actual: usize },

    /// A variable's output size does not match the requested shape.
    #[error("variable produces {actual} entries per time point but the output shape holds {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The output shape has no entries.
    #[error("output shape must have at least one non-zero dimension")]
    EmptyShape,

    /// No interpolation times were given.
    #[error("no interpolation times were given")]
    NoTimes,

    /// An interpolation time is not finite.
    #[error("non-finite interpolation time {value}")]
    NonFiniteTime { value: f64 },

    /// Interpolation times are not sorted ascending.
    #[error("interpolation times must be sorted ascending (violated at index {index})")]
    UnsortedTimes { index: usize },

    /// An interpolation time precedes the initial solution time.
    #[error("interpolation time {t} is before the initial solution time {start}")]
    TimeBeforeStart { t: f64, start: f64 },

    /// Hermite interpolation was requested on a solution without derivatives.
    #[error("Hermite interpolation needs state derivatives on every segment")]
    DerivativesUnavailable,

    /// A variable function failed to evaluate.
    #[error("variable evaluation failed")]
    Variable(#[source] Box<dyn StdError + Send + Sync>),
}
