//! Shared Module
//!
//! Types and helpers that do not depend on the server stack: response bodies,
//! the version comparator and the shared error type. Everything here compiles
//! without the `ssr` feature.

/// Shared error types
pub mod error;

/// Version string parsing and comparison
pub mod version;

/// Document response types
pub mod document;

pub use error::SharedError;
pub use version::{compare_versions, Version, VersionOrdering};
pub use document::{
    DocumentEnvelope, DocumentView, MessageResponse, ShareView, StoredDocumentView,
    VersionSummary,
};
