//! Locked storage behind the cache facade.
//!
//! One mutex guards the whole entry map, so every cache operation is a
//! resource-wide critical section rather than a per-key one. The map is an
//! `IndexMap` ordered by recency of access: reads move an entry to the
//! back, so the front is always the LRU candidate when a capacity cap is
//! configured.

use indexmap::IndexMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::config::CacheConfig;
use crate::entry::Entry;
use crate::stats::CacheStats;

/// Internal storage for [`crate::Cache`].
#[derive(Debug)]
pub struct Store<V> {
    entries: Mutex<IndexMap<String, Entry<V>>>,
    config: CacheConfig,
    stats: Arc<CacheStats>,
}

impl<V: Clone> Store<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Mutex::new(IndexMap::new()),
            config,
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Acquire the entry map. A poisoned lock is recovered: the map only
    /// holds plain values, so a panic elsewhere cannot leave it torn.
    fn lock(&self) -> MutexGuard<'_, IndexMap<String, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a key, expiring it lazily if its TTL has elapsed.
    ///
    /// A live entry counts as a hit and is moved to the back of the map
    /// (most recently used). An expired entry is removed and counted as
    /// both a miss and an expiration.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.lock();

        let Some(idx) = entries.get_index_of(key) else {
            self.stats.record_miss();
            return None;
        };

        let expired = entries
            .get_index(idx)
            .map(|(_, entry)| entry.is_expired())
            .unwrap_or(true);

        if expired {
            entries.shift_remove_index(idx);
            self.stats.entry_removed();
            self.stats.record_expiration();
            self.stats.record_miss();
            return None;
        }

        let value = match entries.get_index_mut(idx) {
            Some((_, entry)) => {
                entry.touch();
                entry.value().clone()
            }
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        // Most recently used goes to the back; the front stays the LRU.
        let back = entries.len() - 1;
        entries.move_index(idx, back);

        self.stats.record_hit();
        Some(value)
    }

    /// Write a value using the configured default TTL.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.insert(key.into(), value, self.config.default_ttl);
    }

    /// Write a value with an explicit TTL.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.insert(key.into(), value, Some(ttl));
    }

    fn insert(&self, key: String, value: V, ttl: Option<Duration>) {
        let entry = match ttl {
            Some(ttl) => Entry::expiring_at(value, Instant::now() + ttl),
            None => Entry::new(value),
        };

        let mut entries = self.lock();

        let replacing = entries.contains_key(&key);
        if !replacing {
            if let Some(cap) = self.config.max_capacity {
                while entries.len() >= cap {
                    self.evict_lru(&mut entries);
                }
            }
            self.stats.entry_added();
        }

        entries.insert(key, entry);
        self.stats.record_set();
    }

    /// Remove a key. Returns whether it was present. Idempotent.
    pub fn delete(&self, key: &str) -> bool {
        let mut entries = self.lock();
        let existed = entries.shift_remove(key).is_some();
        if existed {
            self.stats.entry_removed();
            self.stats.record_delete();
        }
        existed
    }

    /// Whether a live (non-expired) entry exists for the key.
    ///
    /// Expired entries are removed on the way through, but recency is not
    /// refreshed and no hit or miss is recorded.
    pub fn contains(&self, key: &str) -> bool {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => return false,
        };

        if expired {
            entries.shift_remove(key);
            self.stats.entry_removed();
            self.stats.record_expiration();
            false
        } else {
            true
        }
    }

    /// Number of resident entries, including unread expired ones.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.clear();
        self.stats.reset_entries(0);
    }

    /// Sweep out every expired entry, returning how many were removed.
    ///
    /// The cache never sweeps on its own; an entry written and never read
    /// again stays resident until this is called, it is deleted, or the
    /// process exits.
    pub fn cleanup_expired(&self) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        let now = Instant::now();

        entries.retain(|_, entry| {
            let expired = entry.is_expired_at(now);
            if expired {
                self.stats.record_expiration();
                self.stats.entry_removed();
            }
            !expired
        });

        before - entries.len()
    }

    pub fn stats(&self) -> Arc<CacheStats> {
        Arc::clone(&self.stats)
    }

    fn evict_lru(&self, entries: &mut IndexMap<String, Entry<V>>) {
        if entries.shift_remove_index(0).is_some() {
            self.stats.record_eviction();
            self.stats.entry_removed();
        }
    }
}
