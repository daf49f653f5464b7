//! Shared Error Types
//!
//! This module defines error types that are shared between the HTTP layer and
//! the pure helpers that do not depend on the server stack (version parsing,
//! request validation).
//!
//! # Error Categories
//!
//! - `ValidationError` - A request field is missing or malformed
//! - `ParseError` - A version string could not be parsed
//!
//! # Usage
//!
//! ```rust
//! use docvault::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "title must not be empty");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Version string parse error
    #[error("Invalid version '{input}': {message}")]
    ParseError {
        /// The rejected input
        input: String,
        /// What was wrong with it
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new version parse error
    pub fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            input: input.into(),
            message: message.into(),
        }
    }
}
