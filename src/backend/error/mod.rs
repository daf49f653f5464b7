//! Backend Error Module
//!
//! Error types used by handlers and stores, and their conversion into HTTP
//! responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse and extractor rejection conversions
//! ```
//!
//! Handlers return `Result<_, BackendError>`; the error renders itself as a
//! JSON body with an `error` field and the matching status code.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::{BackendError, BackendResult};
