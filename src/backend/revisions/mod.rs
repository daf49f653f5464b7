//! Versioned Documents Module
//!
//! Documents whose revisions are uploaded as files. Each upload appends an
//! entry with a fresh per-document version id; entries are never removed or
//! reordered.
//!
//! - **`db`** - store operations (create / get / append / find / collaborate)
//! - **`handlers`** - `/documents` HTTP handlers
//! - **`types`** - request and response bodies
//!
//! # Cache keys
//!
//! - `stored:{id}` - the document view, invalidated by uploads and collaborate
//! - `version:{id}:{version_id}` - a version entry, invalidated by uploads

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

/// Request and response types
pub mod types;

pub use db::{StoredDocument, VersionEntry};
