//! Server Module
//!
//! Everything needed to turn a `ServerConfig` into a running router.
//!
//! - **`config`** - Environment configuration and database loading
//! - **`state`** - `AppState`, `KeyedLocks` and `FromRef` implementations
//! - **`init`** - State construction and app creation
//! - **`detached`** - Writes that survive request cancellation
//!
//! # Example
//!
//! ```rust,no_run
//! use docvault::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! # Ok(())
//! # }
//! ```

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

/// Cancellation-safe writes
pub mod detached;

pub use config::{ConfigError, ServerConfig};
pub use detached::run_detached;
pub use init::{build_state, create_app};
pub use state::{AppState, KeyedLocks};
