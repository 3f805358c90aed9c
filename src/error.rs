//! Unified error types for qqtable.
//!
//! This module provides a single [`QqTableError`] enum that covers every fatal
//! failure in the library. Malformed label lines are *not* errors: they are
//! reported as [`Diagnostic`](crate::parser::Diagnostic)s and parsing goes on.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for qqtable operations.
///
/// # Example
///
/// ```rust
/// use qqtable::error::Result;
/// use qqtable::Conversation;
///
/// fn my_function() -> Result<Vec<Conversation>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, QqTableError>;

/// The error type for all qqtable operations.
///
/// Every variant aborts the run: there is no partial-success mode.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QqTableError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - Permission denied while reading the export
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export file does not exist.
    #[error("Input file not found: {}", path.display())]
    InputNotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// A line had the shape of a message header but its date or time values
    /// are out of range (e.g. month 13, hour 25).
    #[error("Invalid timestamp '{input}' on line {line}")]
    InvalidTimestamp {
        /// 1-based line number in the export
        line: usize,
        /// The offending timestamp text
        input: String,
    },

    /// A configuration value has the wrong type.
    #[error("Invalid value '{value}' for config key '{key}'. Expected: {expected}")]
    InvalidConfig {
        /// The configuration key
        key: String,
        /// The value found in the file
        value: String,
        /// Description of the accepted values
        expected: &'static str,
    },

    /// The output directory could not be removed or recreated.
    #[error("Cannot prepare output directory {}: {source}", path.display())]
    OutputDir {
        /// The output directory
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when an in-memory table is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for QqTableError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        QqTableError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl QqTableError {
    /// Creates an input-not-found error.
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        QqTableError::InputNotFound { path: path.into() }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(line: usize, input: impl Into<String>) -> Self {
        QqTableError::InvalidTimestamp {
            line,
            input: input.into(),
        }
    }

    /// Creates an invalid boolean config value error.
    pub fn invalid_bool(key: impl Into<String>, value: impl Into<String>) -> Self {
        QqTableError::InvalidConfig {
            key: key.into(),
            value: value.into(),
            expected: "true or false",
        }
    }

    /// Creates an output directory error.
    pub fn output_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        QqTableError::OutputDir {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, QqTableError::Io(_))
    }

    /// Returns `true` if the input file was missing.
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, QqTableError::InputNotFound { .. })
    }

    /// Returns `true` if this is a timestamp error.
    pub fn is_invalid_timestamp(&self) -> bool {
        matches!(self, QqTableError::InvalidTimestamp { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, QqTableError::InvalidConfig { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
