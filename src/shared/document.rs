//! Document Wire Types
//!
//! Response bodies returned by the document endpoints. They carry no storage
//! details (no file paths, no password hashes) and are safe to hand to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Plain acknowledgement body: `{"message": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A relational document as returned by `GET /document/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentView {
    pub title: String,
    pub body: String,
    /// Starts at 1, incremented once per accepted update
    pub version: i64,
}

/// Wrapper matching the `{"document": {...}}` response shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentEnvelope<T> {
    pub document: T,
}

/// A share record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareView {
    pub id: i64,
    pub document_id: i64,
    pub user_id: i64,
}

/// One uploaded revision of a versioned document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionSummary {
    pub version_id: String,
    pub filename: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

/// A versioned document as returned by `GET /documents/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredDocumentView {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Oldest first
    pub versions: Vec<VersionSummary>,
    pub collaborators: Vec<i64>,
}
