//! Error types for the Payslip Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Calculation itself never fails: invalid numeric input is normalized to zero
//! before it reaches the calculator. The variants here cover configuration,
//! edit-path lookups, and the external collaborators at the edges of the engine.

use thiserror::Error;

/// The main error type for the Payslip Engine.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
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

    /// A month name did not match any calendar month.
    #[error("Unknown month: {name}")]
    UnknownMonth {
        /// The name that failed to parse.
        name: String,
    },

    /// A year was not a four-digit calendar year.
    #[error("Invalid year: {value}")]
    InvalidYear {
        /// The raw year value.
        value: String,
    },

    /// An edit targeted a field that is not part of the salary components.
    #[error("Unknown payslip field: {name}")]
    UnknownField {
        /// The field name that was not recognised.
        name: String,
    },

    /// Writing the CSV export failed.
    #[error("CSV export failed: {message}")]
    ExportError {
        /// A description of the writer failure.
        message: String,
    },

    /// The external document snapshot collaborator failed.
    #[error("Document snapshot failed: {message}")]
    SnapshotFailed {
        /// The collaborator's failure message, passed through unchanged.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
