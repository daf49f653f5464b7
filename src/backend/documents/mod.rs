//! Relational Documents Module
//!
//! Documents with a title, a body and a version counter, plus share records.
//!
//! - **`db`** - store operations (create / get / update / share)
//! - **`handlers`** - `/document` HTTP handlers
//! - **`types`** - request and response bodies
//!
//! The version counter starts at 1 and grows by exactly one per accepted
//! update. Reads of `GET /document/{id}` are cached under `document:{id}`.

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

/// Request and response types
pub mod types;

pub use db::{DocumentRecord, ShareRecord};
