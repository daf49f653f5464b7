//! Request field validation
//!
//! Presence checks shared by the JSON handlers. They run before any store
//! call so a rejected request never leaves partial state behind.

use crate::backend::error::{BackendError, BackendResult};

/// Require a non-blank string field
pub fn required_text(field: &str, value: Option<String>) -> BackendResult<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(BackendError::validation(field, format!("{} must not be empty", field))),
        None => Err(BackendError::validation(field, format!("Missing {}", field))),
    }
}

/// Require a numeric id field
pub fn required_id(field: &str, value: Option<i64>) -> BackendResult<i64> {
    value.ok_or_else(|| BackendError::validation(field, format!("Missing {}", field)))
}
