//! Cache Module
//!
//! In-memory, time-expiring caches that sit in front of document and version
//! lookups.
//!
//! - **`ttl`** - the `TtlCache` type (get / set / invalidate)
//! - **`keys`** - key builders shared by readers and writers
//!
//! Misses are never cached, and every write path invalidates the keys it
//! affects, so a read that follows a write always sees it.

/// Time-expiring cache
pub mod ttl;

/// Cache key construction
pub mod keys;

pub use ttl::TtlCache;
