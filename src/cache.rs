//! The public cache facade.

use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheConfig;
use crate::stats::{CacheStats, CacheStatus};
use crate::storage::Store;

/// A thread-safe, time-bounded key/value cache with lazy expiry and
/// hit/miss accounting.
///
/// Values are opaque to the cache; it stores whatever `Clone`-able type
/// the caller picks and hands back clones. Cloning the `Cache` itself is
/// cheap and yields another handle to the same underlying store, which is
/// how it is shared across threads.
///
/// Expiry is checked lazily on access only. There is no background sweep:
/// an entry that is written and never read again stays resident until it
/// is deleted, [`Cache::cleanup_expired`] runs, or the process exits.
///
/// # Example
/// ```
/// use inventory_ledger::{Cache, CacheConfig};
/// use std::time::Duration;
///
/// let cache: Cache<String> = Cache::new(CacheConfig::default());
/// cache.set_with_ttl("item:1001", "snapshot".to_string(), Duration::from_secs(60));
///
/// assert_eq!(cache.get("item:1001"), Some("snapshot".to_string()));
/// assert_eq!(cache.status().hits, 1);
/// ```
#[derive(Debug)]
pub struct Cache<V> {
    store: Arc<Store<V>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<V: Clone> Cache<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            store: Arc::new(Store::new(config)),
        }
    }

    /// Look up a key.
    ///
    /// Returns `None` (and records a miss) when the key is absent or its
    /// TTL has elapsed; an elapsed entry is evicted on the way through.
    pub fn get(&self, key: &str) -> Option<V> {
        self.store.get(key)
    }

    /// Write a value under the configured default TTL, unconditionally
    /// overwriting any existing entry for the key.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.store.set(key, value);
    }

    /// Write a value that expires after `ttl`.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.store.set_with_ttl(key, value, ttl);
    }

    /// Remove a key. Returns `true` if it was present; removing an absent
    /// key is a no-op.
    pub fn delete(&self, key: &str) -> bool {
        self.store.delete(key)
    }

    /// Whether a live entry exists for the key. Does not refresh recency
    /// and does not count as a hit or miss.
    pub fn contains(&self, key: &str) -> bool {
        self.store.contains(key)
    }

    /// Resident entry count, possibly including unread expired entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Manually sweep expired entries; returns how many were removed.
    pub fn cleanup_expired(&self) -> usize {
        self.store.cleanup_expired()
    }

    /// Point-in-time counter snapshot: entry count, hits, misses, hit
    /// rate, and friends.
    pub fn status(&self) -> CacheStatus {
        self.store.stats().status()
    }

    /// Shared handle to the live counters, for wiring into an external
    /// metrics system.
    pub fn stats_ref(&self) -> Arc<CacheStats> {
        self.store.stats()
    }
}

impl<V: Clone> Default for Cache<V> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
