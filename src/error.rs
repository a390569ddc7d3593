//! Error types for the binary GA.

use thiserror::Error;

/// Errors produced while configuring or running the optimizer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GaError {
    /// An operation received an argument it cannot work with
    /// (e.g. a zero-length chromosome or parents of different lengths).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Roulette-wheel weights do not form a usable distribution.
    ///
    /// Raised when every fitness value is zero or negative, or when the
    /// weight total is not finite.
    #[error("degenerate fitness values: roulette weights sum to {total}")]
    DegenerateFitness {
        /// Sum of the clamped selection weights.
        total: f64,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GaError>;
