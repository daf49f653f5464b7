/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The SQLite connection pool
 * - File storage for mirrored bodies and for uploaded versions
 * - Read-through caches for both document kinds and for version entries
 * - Per-document upload locks
 * - Per-document cache locks that make a cache fill and a write exclusive
 *
 * Every field is cheap to clone; clones share the same underlying state.
 *
 * # Example
 *
 * ```rust,no_run
 * use docvault::backend::server::state::AppState;
 * use axum::extract::State;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let cached = state.document_cache.len().await;
 * }
 * ```
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::FromRef;
use sqlx::SqlitePool;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::backend::cache::TtlCache;
use crate::backend::documents::DocumentRecord;
use crate::backend::revisions::{StoredDocument, VersionEntry};
use crate::backend::server::config::ServerConfig;
use crate::backend::storage::FileStorage;

/// Per-key async locks
///
/// Locks are created on first use and dropped by `cleanup_idle` once nobody
/// holds or waits on them.
#[derive(Clone, Default)]
pub struct KeyedLocks {
    locks: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Drop locks nobody is using; returns how many were removed
    pub fn cleanup_idle(&self) -> usize {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        let before = locks.len();
        // The map's own reference is the only one left when a lock is idle.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - locks.len()
    }

    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub db_pool: SqlitePool,

    /// Mirror of relational document bodies (`<storage>/<id>.txt`)
    pub storage: FileStorage,

    /// Uploaded version files (`<uploads>/<doc>/<version>_<name>`)
    pub uploads: FileStorage,

    /// `document:{id}` entries
    pub document_cache: TtlCache<DocumentRecord>,

    /// `stored:{id}` entries
    pub stored_cache: TtlCache<StoredDocument>,

    /// `version:{doc}:{version}` entries
    pub version_cache: TtlCache<VersionEntry>,

    /// Serializes uploads per versioned document
    pub upload_locks: KeyedLocks,

    /// Keyed by cache key. A reader holds it from miss to insert, a writer
    /// from commit to invalidate, so an old read is never cached after a
    /// newer write.
    pub cache_locks: KeyedLocks,

    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Build state around an open pool; caches start empty
    pub fn new(config: ServerConfig, db_pool: SqlitePool) -> Self {
        let ttl = config.cache_ttl;
        Self {
            db_pool,
            storage: FileStorage::new(config.storage_dir.clone()),
            uploads: FileStorage::new(config.upload_dir.clone()),
            document_cache: TtlCache::new(ttl),
            stored_cache: TtlCache::new(ttl),
            version_cache: TtlCache::new(ttl),
            upload_locks: KeyedLocks::new(),
            cache_locks: KeyedLocks::new(),
            config: Arc::new(config),
        }
    }

    /// Drop expired cache entries and idle upload locks
    pub async fn run_maintenance(&self) {
        let purged = self.document_cache.purge_expired().await
            + self.stored_cache.purge_expired().await
            + self.version_cache.purge_expired().await;
        let locks = self.upload_locks.cleanup_idle() + self.cache_locks.cleanup_idle();
        tracing::debug!("Maintenance purged {} cache entries and {} idle locks", purged, locks);
    }
}

/// Lets handlers that only touch the database take `State<SqlitePool>`
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}
