//! Error types for the Payroll Deduction Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading tax schedules or
//! computing deductions.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Payroll Deduction Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/schedule.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/schedule.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A tax schedule was structurally invalid (e.g. unordered brackets).
    #[error("Invalid tax schedule '{name}': {message}")]
    InvalidSchedule {
        /// The name of the schedule or table that was rejected.
        name: String,
        /// A description of what made the schedule invalid.
        message: String,
    },

    /// A gross income amount was negative.
    #[error("Invalid gross income {amount}: must not be negative")]
    InvalidIncome {
        /// The rejected amount.
        amount: Decimal,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
