//! Error types for input validation and report I/O

use thiserror::Error;

/// A parameter snapshot that cannot be projected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// Amounts, prices and rates must be finite and not below zero
    #[error("{name} must be a finite, non-negative number (got {value})")]
    Negative { name: &'static str, value: f64 },

    /// Terms and intervals divide amounts, so they must be at least one year
    #[error("{name} must be at least 1 year")]
    ZeroYears { name: &'static str },

    /// Values that are used as divisors (floor area)
    #[error("{name} must be greater than zero (got {value})")]
    NotPositive { name: &'static str, value: f64 },

    /// Form lower bounds (SCOP of at least 1)
    #[error("{name} must be at least {min} (got {value})")]
    BelowMinimum { name: &'static str, value: f64, min: f64 },

    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),

    #[error("invalid value `{value}` for parameter `{name}`")]
    InvalidValue { name: String, value: String },
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
