//! Route Configuration Module
//!
//! - **`router`** - Router assembly and middleware
//! - **`api_routes`** - Users, relational documents, utilities
//! - **`version_routes`** - Versioned documents
//!
//! ```text
//! routes/
//! ├── mod.rs
//! ├── router.rs
//! ├── api_routes.rs
//! └── version_routes.rs
//! ```

/// Main router creation
pub mod router;

/// User and relational document routes
pub mod api_routes;

/// Versioned document routes
pub mod version_routes;

pub use router::create_router;
