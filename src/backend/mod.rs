//! Backend Module
//!
//! All server-side code: an Axum HTTP server over SQLite with file storage
//! for document bodies and uploaded versions.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route configuration and middleware
//! - **`auth`** - User registration
//! - **`documents`** - Relational documents and shares
//! - **`revisions`** - Versioned documents and their upload history
//! - **`cache`** - TTL read-through cache
//! - **`storage`** - Filesystem storage under a base directory
//! - **`system`** - Health, version comparison, fallback
//! - **`validation`** - Request field checks
//! - **`error`** - Backend error type and HTTP conversion
//!
//! ```text
//! backend/
//! ├── mod.rs
//! ├── main.rs         - Server binary
//! ├── server/
//! ├── routes/
//! ├── auth/
//! ├── documents/
//! ├── revisions/
//! ├── cache/
//! ├── storage/
//! ├── error/
//! ├── system.rs
//! └── validation.rs
//! ```
//!
//! # Error Handling
//!
//! Handlers return `BackendResult<T>`. Every failure becomes a JSON body of
//! the form `{"error": "...", "status": 404}`; 5xx bodies carry a generic
//! message while the detail goes to the log.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// User registration
pub mod auth;

/// Relational documents
pub mod documents;

/// Versioned documents
pub mod revisions;

/// TTL cache
pub mod cache;

/// File storage
pub mod storage;

/// Utility endpoints
pub mod system;

/// Request validation helpers
pub mod validation;

pub use error::{BackendError, BackendResult};
pub use server::{create_app, AppState, ServerConfig};
