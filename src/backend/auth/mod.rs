//! Authentication Module
//!
//! User registration. Sessions and login are out of scope; the module only
//! owns the `users` table and the `POST /user` handler.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs      - Module exports
//! ├── users.rs    - User model and database operations
//! └── handlers/   - HTTP handlers
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Password hashes are never serialized into responses

/// User model and database operations
pub mod users;

/// HTTP handlers
pub mod handlers;

pub use handlers::register_user;
pub use users::User;
