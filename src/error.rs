//! Error types for the Personnel Reconciliation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during reconciliation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Personnel Reconciliation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use personnel_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
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

    /// Input failed validation before any state was touched.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The target date falls outside the editable submission window.
    ///
    /// Carries the full boundary so the caller can be told exactly which
    /// range is still open and until when.
    #[error(
        "Date {date} is outside the editable window {window_start} to {window_end} (submission deadline {deadline})"
    )]
    OutOfWindow {
        /// The date that was rejected.
        date: NaiveDate,
        /// First editable date of the current window.
        window_start: NaiveDate,
        /// Last editable date of the current window.
        window_end: NaiveDate,
        /// Submission deadline applying to the rejected date's month.
        deadline: NaiveDate,
    },

    /// The caller is not permitted to perform the requested update.
    ///
    /// Deliberately carries no detail about the blocked field values.
    #[error("Employee {employee_id} is not permitted to perform this update")]
    Forbidden {
        /// The calling employee's id.
        employee_id: u32,
    },

    /// A required record was absent from the store.
    #[error("{entity} not found for {key}")]
    NotFound {
        /// The kind of record that was missing (e.g. "payroll record").
        entity: &'static str,
        /// The key that was looked up.
        key: String,
    },

    /// The store transaction could not commit; prior state is untouched.
    #[error("Store transaction failed: {message}")]
    StoreFailure {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
