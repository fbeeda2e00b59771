//! Hit/miss accounting for the cache.
//!
//! Counters are plain atomics so recording an event never contends with
//! the entry map's lock. `CacheStatus` is the serializable point-in-time
//! view exposed for observability.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Live operation counters for one cache instance.
///
/// Safe to read from any thread; obtain a consistent-enough view with
/// [`CacheStats::status`].
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Lookups that found a live entry.
    hits: AtomicU64,

    /// Lookups that found nothing, or found an expired entry.
    misses: AtomicU64,

    /// Entries removed to make room under a capacity cap.
    evictions: AtomicU64,

    /// Entries removed because their TTL elapsed.
    expirations: AtomicU64,

    /// Current number of resident entries (may include unread expired ones).
    entries: AtomicU64,

    /// Total writes.
    sets: AtomicU64,

    /// Total explicit deletes.
    deletes: AtomicU64,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_expiration(&self) {
        self.expirations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn entry_added(&self) {
        self.entries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn entry_removed(&self) {
        self.entries.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn reset_entries(&self, count: u64) {
        self.entries.store(count, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn evictions(&self) -> u64 {
        self.evictions.load(Ordering::Relaxed)
    }

    pub fn expirations(&self) -> u64 {
        self.expirations.load(Ordering::Relaxed)
    }

    pub fn entries(&self) -> u64 {
        self.entries.load(Ordering::Relaxed)
    }

    pub fn sets(&self) -> u64 {
        self.sets.load(Ordering::Relaxed)
    }

    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Hit rate as a percentage in `[0.0, 100.0]`.
    ///
    /// `0.0` when no lookups have happened yet.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }

    /// Take a point-in-time snapshot of all counters.
    pub fn status(&self) -> CacheStatus {
        CacheStatus {
            entries: self.entries(),
            hits: self.hits(),
            misses: self.misses(),
            evictions: self.evictions(),
            expirations: self.expirations(),
            sets: self.sets(),
            deletes: self.deletes(),
            hit_rate: self.hit_rate(),
        }
    }
}

/// A serializable snapshot of cache counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatus {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub sets: u64,
    pub deletes: u64,
    pub hit_rate: f64,
}
