//! Error types for the core crate.

use thiserror::Error;

/// Errors produced when constructing a problem or solver configuration.
///
/// The solver itself never fails once its inputs validate: an instance that
/// cannot be driven to zero residual is reported through
/// [`SolverResult::residual_bad_theory`](crate::SolverResult::residual_bad_theory).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// The good-state ratio is NaN, infinite or out of range. Problems need
    /// (0, 1); the bare operators also accept the endpoints.
    #[error("good-state ratio {0} is out of range (problems need 0 < a < 1)")]
    InvalidRatio(f64),

    /// At least one amplification round is required.
    #[error("iteration count must be at least 1, got {0}")]
    InvalidIterations(usize),

    /// A solver configuration field is out of range.
    #[error("invalid solver configuration: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
