//! Error types for LitTrack
//!
//! Provides a comprehensive error handling system with:
//! - Distinct error types for different failure modes
//! - Process exit code mapping
//! - Error codes for machine-readable reporting

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    MissingField,
    InvalidFormat,
    InvalidInput,
    ChecksumMismatch,

    // Resource errors (4xxx)
    EntryNotFound,

    // Conflict errors (5xxx)
    DuplicateEntry,

    // Storage errors (7xxx)
    StorageError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::MissingField => 1002,
            ErrorCode::InvalidFormat => 1003,
            ErrorCode::InvalidInput => 1004,
            ErrorCode::ChecksumMismatch => 1005,

            // Resources (4xxx)
            ErrorCode::EntryNotFound => 4001,

            // Conflicts (5xxx)
            ErrorCode::DuplicateEntry => 5001,

            // Storage (7xxx)
            ErrorCode::StorageError => 7001,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Required field missing: {field}")]
    MissingField { field: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    /// The entry collection handed to analysis or import is malformed
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Checksum mismatch: expected {expected}, computed {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    // Resource errors
    #[error("Entry not found: {id}")]
    EntryNotFound { id: String },

    // Conflict errors
    #[error("Duplicate entry id: {id}")]
    DuplicateEntry { id: String },

    // Storage errors
    #[error("Storage error at {path}: {message}")]
    Storage { path: String, message: String },

    // Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::MissingField { .. } => ErrorCode::MissingField,
            AppError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            AppError::InvalidInput { .. } => ErrorCode::InvalidInput,
            AppError::ChecksumMismatch { .. } => ErrorCode::ChecksumMismatch,
            AppError::EntryNotFound { .. } => ErrorCode::EntryNotFound,
            AppError::DuplicateEntry { .. } => ErrorCode::DuplicateEntry,
            AppError::Storage { .. } => ErrorCode::StorageError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Process exit code for this error (sysexits-style)
    pub fn exit_code(&self) -> i32 {
        match self {
            // 65 EX_DATAERR
            AppError::Validation { .. }
            | AppError::MissingField { .. }
            | AppError::InvalidFormat { .. }
            | AppError::InvalidInput { .. }
            | AppError::ChecksumMismatch { .. }
            | AppError::DuplicateEntry { .. }
            | AppError::Serialization(_) => 65,

            // 66 EX_NOINPUT
            AppError::EntryNotFound { .. } => 66,

            // 74 EX_IOERR
            AppError::Storage { .. } => 74,

            // 78 EX_CONFIG
            AppError::Configuration { .. } => 78,

            // 70 EX_SOFTWARE
            AppError::Internal { .. } | AppError::Other(_) => 70,
        }
    }

    /// Errors caused by the data the user supplied rather than the tool
    pub fn is_user_error(&self) -> bool {
        self.exit_code() == 65 || self.exit_code() == 66
    }

    /// Log the error at a level matching its class
    pub fn log(&self) {
        let code = self.code();
        if self.is_user_error() {
            tracing::warn!(error = %self, code = ?code, "Rejected input");
        } else {
            tracing::error!(error = %self, code = ?code, "Operation failed");
        }
    }
}

/// Structured error body for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub numeric_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        let field = match err {
            AppError::Validation { field, .. } => field.clone(),
            AppError::MissingField { field } => Some(field.clone()),
            _ => None,
        };

        ErrorResponse {
            error: ErrorDetails {
                code: err.code(),
                numeric_code: err.code().as_code(),
                message: err.to_string(),
                field,
            },
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration {
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();

        AppError::Validation {
            message: errors.to_string(),
            field: fields.into_iter().next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = AppError::EntryNotFound { id: "entry_1".into() };
        assert_eq!(err.code(), ErrorCode::EntryNotFound);
        assert_eq!(err.code().as_code(), 4001);
        assert_eq!(err.exit_code(), 66);
    }

    #[test]
    fn test_validation_error() {
        let err = AppError::Validation {
            message: "citation is required".into(),
            field: Some("citation".into()),
        };
        assert_eq!(err.exit_code(), 65);
        assert!(err.is_user_error());

        let body = ErrorResponse::from(&err);
        assert_eq!(body.error.field.as_deref(), Some("citation"));
        assert_eq!(body.error.numeric_code, 1001);
    }

    #[test]
    fn test_internal_error() {
        let err = AppError::Internal {
            message: "Something went wrong".into(),
        };
        assert_eq!(err.exit_code(), 70);
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: AppError = io.into();
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
