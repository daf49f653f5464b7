/**
 * Time-Expiring Cache
 *
 * `TtlCache<V>` is an in-memory key → value map where every entry carries its
 * own expiry deadline. It is the only shared mutable state outside the
 * database, so all access goes through a `tokio::sync::RwLock`.
 *
 * # Semantics
 *
 * - A value younger than its ttl is returned as is.
 * - An expired value is never returned; it is dropped on the next access or by
 *   `purge_expired`.
 * - Writers call `invalidate` / `invalidate_prefix` for every key their write
 *   could affect.
 * - Clones share the same underlying map.
 */

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Thread-safe time-expiring cache
#[derive(Debug, Clone)]
pub struct TtlCache<V> {
    entries: Arc<RwLock<HashMap<String, CacheEntry<V>>>>,
    default_ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// Create an empty cache whose `insert` uses `default_ttl`
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
        }
    }

    /// Get a live value
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: drop it unless someone refreshed it in between.
        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .map(|entry| entry.is_expired(Instant::now()))
            .unwrap_or(false)
        {
            entries.remove(key);
        }
        None
    }

    /// Store a value with an explicit ttl
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Store a value with the default ttl
    pub async fn insert(&self, key: impl Into<String>, value: V) {
        self.set(key, value, self.default_ttl).await;
    }

    /// Remove one key. Returns true if an entry was present.
    pub async fn invalidate(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    /// Remove every key starting with `prefix`. Returns the number removed.
    pub async fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    /// Drop all expired entries. Returns the number removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        before - entries.len()
    }

    /// Number of stored entries, including expired ones not yet purged
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
