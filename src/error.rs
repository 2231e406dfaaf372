//! Unified error types for chatstats.
//!
//! This module provides a single [`ChatstatsError`] enum that covers all error
//! cases in the library, following the pattern used by `serde_json` and `csv`.
//!
//! Not everything that looks wrong in an export is an error here. Messages
//! carrying a `subtype` are skipped, optional fields become `None`, and a
//! malformed thread structure yields no reply records. Only the conditions
//! below abort an operation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::MessageRow;
///
/// fn my_function() -> Result<Vec<MessageRow>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatsError>;

/// The error type for all chatstats operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatsError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The channel directory or a file inside it doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse an input file.
    ///
    /// Contains the format being parsed, the underlying parse error,
    /// and optionally the file path.
    #[error("Failed to parse {format}{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "channel export", "users export")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// A message without a `subtype` lacks one of the fields every content
    /// message must carry (`text`, `user`, `ts`), or an annotation leaf lacks
    /// its payload.
    #[error("Message #{index} is missing required field '{field}'{}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    MissingField {
        /// Name of the absent key
        field: &'static str,
        /// Position of the message within its batch
        index: usize,
        /// The file the batch came from, if any
        path: Option<PathBuf>,
    },

    /// The input doesn't match the expected structure.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A message timestamp that is not a unix-seconds string.
    #[error("Invalid timestamp '{input}': expected unix seconds like \"1700000000.000100\"")]
    InvalidTimestamp {
        /// The offending value
        input: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parsing/serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when in-memory output is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// JSON parsing error
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::string::FromUtf8Error> for ChatstatsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatstatsError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatsError {
    /// Creates a parse error for a channel export file.
    pub fn channel_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatstatsError::Parse {
            format: "channel export",
            source: ParseErrorKind::Json(source),
            path,
        }
    }

    /// Creates a parse error for a users export file.
    pub fn users_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatstatsError::Parse {
            format: "users export",
            source: ParseErrorKind::Json(source),
            path,
        }
    }

    /// Creates a missing-field error for the message at `index`.
    pub fn missing_field(field: &'static str, index: usize) -> Self {
        ChatstatsError::MissingField {
            field,
            index,
            path: None,
        }
    }

    /// Attaches a file path to errors that carry one and don't have it yet.
    #[must_use]
    pub fn with_path(mut self, file: impl Into<PathBuf>) -> Self {
        if let ChatstatsError::MissingField { path, .. } | ChatstatsError::Parse { path, .. } =
            &mut self
        {
            if path.is_none() {
                *path = Some(file.into());
            }
        }
        self
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatstatsError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatstatsError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(input: impl Into<String>) -> Self {
        ChatstatsError::InvalidTimestamp {
            input: input.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatsError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatstatsError::Parse { .. })
    }

    /// Returns `true` if a required message field was absent.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, ChatstatsError::MissingField { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatstatsError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatstatsError::InvalidDate { .. })
    }
}
