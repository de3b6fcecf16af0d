//! Error types for the load limits engine
//!
//! This module defines the errors that can occur around the validation core:
//! reading input, parsing records, and loading configuration. Evaluating a
//! request never produces an error; a rejection is an ordinary `Decision`.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **Parsing Errors**: Malformed JSON, non-numeric fields, bad timestamps
//! - **Configuration Errors**: Unreadable config, missing or zero limits
//! - **Runtime Errors**: Failure to start the async runtime

use thiserror::Error;

/// Main error type for the load limits engine
///
/// Every variant is fatal for the input source being processed: the run stops
/// and the error is reported to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LimitsError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// An input line could not be parsed into a load request
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A record field held a value that cannot be converted
    #[error("Invalid {field} '{value}'")]
    InvalidField {
        /// Name of the offending field
        field: String,
        /// The raw value
        value: String,
    },

    /// A timestamp did not match `YYYY-MM-DDTHH:MM:SSZ`
    #[error("Invalid timestamp '{value}', expected YYYY-MM-DDTHH:MM:SSZ")]
    InvalidTimestamp {
        /// The raw timestamp string
        value: String,
    },

    /// The configuration could not be loaded or is incomplete
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// A limit ceiling is missing or zero
    #[error("Invalid limits: {field} must be greater than zero")]
    InvalidLimits {
        /// Name of the offending ceiling
        field: String,
    },

    /// The processing runtime could not be started
    #[error("Runtime error: {message}")]
    RuntimeError {
        /// Description of the runtime failure
        message: String,
    },
}

// Conversion from io::Error to LimitsError
impl From<std::io::Error> for LimitsError {
    fn from(error: std::io::Error) -> Self {
        LimitsError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from serde_json::Error to LimitsError
impl From<serde_json::Error> for LimitsError {
    fn from(error: serde_json::Error) -> Self {
        LimitsError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LimitsError {
    /// Create a ParseError at a specific line
    pub fn parse_error(line: u64, message: impl Into<String>) -> Self {
        LimitsError::ParseError {
            line: Some(line),
            message: message.into(),
        }
    }

    /// Create an InvalidField error
    pub fn invalid_field(field: &str, value: &str) -> Self {
        LimitsError::InvalidField {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create a ParseError for a line longer than `max` bytes
    pub fn line_too_long(max: usize) -> Self {
        LimitsError::ParseError {
            line: None,
            message: format!("line longer than {} bytes", max),
        }
    }

    /// Create an InvalidTimestamp error
    pub fn invalid_timestamp(value: &str) -> Self {
        LimitsError::InvalidTimestamp {
            value: value.to_string(),
        }
    }

    /// Create a ConfigError
    pub fn config(message: impl Into<String>) -> Self {
        LimitsError::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidLimits error
    pub fn invalid_limits(field: &str) -> Self {
        LimitsError::InvalidLimits {
            field: field.to_string(),
        }
    }

    /// Attach a line number to a record-level error
    ///
    /// Errors that already carry a line are returned unchanged.
    pub fn at_line(self, line: u64) -> Self {
        match self {
            LimitsError::ParseError { line: None, message } => LimitsError::ParseError {
                line: Some(line),
                message,
            },
            LimitsError::ParseError { .. } => self,
            other => LimitsError::parse_error(line, other.to_string()),
        }
    }
}
