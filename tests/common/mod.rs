//! Common test utilities and helpers
//!
//! - `app` - a `TestServer` over a fresh database and fresh directories
//! - `assertions` - assertion macros and JSON error checks

#[cfg(feature = "ssr")]
pub mod app;

pub use assertions::*;
#[cfg(feature = "ssr")]
pub use app::*;
