//! Docvault - Main Library
//!
//! A document service with two document models behind one HTTP API:
//!
//! - **Relational documents**: title, body and a version counter that grows
//!   by one per update, plus share records linking documents to users.
//! - **Versioned documents**: an append-only list of uploaded file versions,
//!   a content field overwritten by collaborators, and a collaborator set.
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared by the server and its clients
//!   - Response views, version string comparison, error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server over SQLite
//!   - File storage, TTL caching, per-document upload locking
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the `backend` module and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use docvault::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::default()).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
