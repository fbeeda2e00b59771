//! Cache configuration.

use std::time::Duration;

/// Configuration for a cache instance, built with a fluent builder:
///
/// ```
/// use inventory_ledger::CacheConfig;
/// use std::time::Duration;
///
/// let config = CacheConfig::new()
///     .max_capacity(10_000)
///     .default_ttl(Duration::from_secs(60))
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// Entry-count cap. Inserting a new key at the cap evicts the
    /// least-recently-used entry. `None` means unbounded.
    pub(crate) max_capacity: Option<usize>,

    /// TTL applied by `set` when the caller does not pass one.
    /// `None` means entries written via `set` never expire.
    pub(crate) default_ttl: Option<Duration>,
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of resident entries. `0` means unbounded.
    pub fn max_capacity(mut self, capacity: usize) -> Self {
        self.max_capacity = if capacity == 0 { None } else { Some(capacity) };
        self
    }

    /// Default TTL for entries written without an explicit one.
    /// `Duration::ZERO` disables the default.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = if ttl.is_zero() { None } else { Some(ttl) };
        self
    }

    pub fn build(self) -> Self {
        self
    }

    pub fn get_max_capacity(&self) -> Option<usize> {
        self.max_capacity
    }

    pub fn get_default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }
}
