//! Authentication Handlers Module
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports
//! ├── types.rs     - Request and response types
//! └── register.rs  - POST /user
//! ```

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

pub use types::{RegisterRequest, RegisterResponse};
pub use register::register_user;
