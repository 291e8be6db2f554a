//! Error types for field-presence
//!
//! The inference engine itself never fails. Everything here belongs to the
//! layers around it: settings resolution, payload parsing, the Data API
//! client and output files.

use thiserror::Error;

/// The main error type for field-presence
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Missing {setting}. {hint}")]
    MissingSetting { setting: String, hint: String },

    #[error("{field} must be {expected}")]
    InvalidSetting { field: String, expected: String },

    #[error("{field} must be valid JSON: {source}")]
    InvalidSettingJson {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read env file '{path}': {message}")]
    EnvFile { path: String, message: String },

    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Failed to read input: {0}")]
    ReadInput(#[source] std::io::Error),

    #[error("{context} is not valid JSON: {source}")]
    InvalidJson {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No records found. Provide a JSON array or an object with array at \"data\" or \"records\".")]
    NoRecords,

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sample fetch failed ({status}): {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Failed to serialize JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write '{path}': {source}")]
    WriteOutput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`], used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A required setting is missing or malformed
    Configuration,
    /// The input could not be read or is not usable JSON
    Input,
    /// The Data API request failed
    Transport,
    /// A result could not be rendered or written
    Output,
}

impl Error {
    /// Create a missing setting error with a hint on how to supply it
    pub fn missing_setting(setting: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingSetting {
            setting: setting.into(),
            hint: hint.into(),
        }
    }

    /// Create an invalid setting error
    pub fn invalid_setting(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Create an invalid JSON error for a named input
    pub fn invalid_json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidJson {
            context: context.into(),
            source,
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::MissingSetting { .. }
            | Error::InvalidSetting { .. }
            | Error::InvalidSettingJson { .. }
            | Error::EnvFile { .. } => ErrorCategory::Configuration,
            Error::ReadInput(_) | Error::InvalidJson { .. } | Error::NoRecords => {
                ErrorCategory::Input
            }
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. } => {
                ErrorCategory::Transport
            }
            Error::Serialize(_) | Error::WriteOutput { .. } | Error::Io(_) | Error::Other(_) => {
                ErrorCategory::Output
            }
        }
    }
}

/// Result type alias for field-presence
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}
