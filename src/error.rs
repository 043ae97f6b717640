//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing payroll.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidInput {
///     field: "salary".to_string(),
///     message: "must not be negative".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid input 'salary': must not be negative");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A salary, income or attendance figure was outside its domain.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was rejected.
        field: String,
        /// A description of why the value was rejected.
        message: String,
    },

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

    /// A rate table, band or bracket schedule violates one of its invariants.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the violated invariant.
        message: String,
    },

    /// A payroll run referenced an employee that was not supplied.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee ID that was not found.
        id: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for building an [`EngineError::InvalidConfig`].
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
