//! Configuration surface for the implicit DAE integrator backend.
//!
//! The integration core itself (BDF time stepping, Newton iteration, linear
//! algebra) is external; this module owns the typed option record it is
//! configured with and the cross-field rules that make a configuration
//! valid. Validation fails fast at construction time, before any numerical
//! work begins.

mod config;
mod error;
mod jacobian;
mod linear_solver;
mod preconditioner;
mod tolerance;

pub use config::Config;
pub use error::ConfigError;
pub use jacobian::Jacobian;
pub use linear_solver::LinearSolver;
pub use preconditioner::Preconditioner;
pub use tolerance::{Tolerance, ToleranceError};
