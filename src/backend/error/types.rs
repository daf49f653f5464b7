/**
 * Backend Error Types
 *
 * This module defines the error type used by every HTTP handler and store
 * function in the backend. Each variant maps to exactly one HTTP status.
 *
 * # Error Categories
 *
 * ## Client errors
 *
 * - `HandlerError` - request-level problems with an explicit status
 * - `SharedError` - validation and version parse failures (400)
 * - `NotFound` - unknown document, version or file (404)
 * - `Conflict` - unique constraint or version mismatch (409)
 *
 * ## Server errors
 *
 * - `StorageError` / `IoError` - filesystem failures (500)
 * - `DatabaseError` - sqlx failures (500)
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use docvault::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "No document part");
/// let err = BackendError::not_found("Document not found");
/// let err = BackendError::validation("title", "title must not be empty");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., missing multipart field, malformed body)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// The addressed document, version or file does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// The write collides with existing state
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Filesystem operation failed with context
    #[error("Storage error: {message}")]
    StorageError {
        /// Human-readable error message
        message: String,
    },

    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Raw I/O failure
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Shared error (validation, version parsing)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

/// Result alias used across the backend
pub type BackendResult<T> = Result<T, BackendError>;

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageError {
            message: message.into(),
        }
    }

    /// Create a validation error for a request field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SharedError(SharedError::validation(field, message))
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `NotFound` - 404 Not Found (also `sqlx::Error::RowNotFound`)
    /// - `Conflict` - 409 Conflict
    /// - `SharedError` - 400 Bad Request
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::StorageError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DatabaseError(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the full error message, including internal detail
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::NotFound { message } => message.clone(),
            Self::Conflict { message } => message.clone(),
            Self::StorageError { message } => message.clone(),
            Self::DatabaseError(err) => err.to_string(),
            Self::IoError(err) => err.to_string(),
            Self::SharedError(err) => err.to_string(),
        }
    }

    /// Get the message that is safe to send to clients
    ///
    /// Server-side failures are reduced to a generic description; the detail
    /// only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::DatabaseError(sqlx::Error::RowNotFound) => "Record not found".to_string(),
            Self::DatabaseError(_) => "A database error occurred".to_string(),
            Self::StorageError { .. } | Self::IoError(_) => "A storage error occurred".to_string(),
            _ => self.message(),
        }
    }
}
