//! Error types for the flextime reconciliation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during reconciliation.
//!
//! Note that several conditions are deliberately *not* errors: orphan or
//! unmatched punch events are logged and dropped, employees without a
//! flextime schedule are skipped, and an on-leave day without an approved
//! vacation request is treated as a full unpaid day. Only configuration
//! problems and storage failures surface as [`EngineError`].

use thiserror::Error;

/// The main error type for the flextime reconciliation engine.
///
/// # Example
///
/// ```
/// use flextime_engine::error::EngineError;
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
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A schedule definition was incomplete or inconsistent.
    #[error("Invalid schedule for grade '{grade}': {message}")]
    InvalidSchedule {
        /// The grade the schedule belongs to.
        grade: String,
        /// A description of what made the schedule invalid.
        message: String,
    },

    /// A backing store (ledger, attendance, punches, ...) failed.
    ///
    /// Persistence failures on a given day abort the remaining days for
    /// that employee; the watermark stays at the last persisted day.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
