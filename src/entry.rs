//! Cache entry with expiry and last-access metadata.

use std::time::Instant;

/// A single cache entry: the stored value plus the metadata needed for
/// lazy TTL expiry and LRU ordering.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    /// The stored value.
    pub(crate) value: V,

    /// Absolute expiry time. `None` means the entry never expires.
    pub(crate) expires_at: Option<Instant>,

    /// When this entry was last read (LRU tracking).
    pub(crate) last_accessed: Instant,
}

impl<V> Entry<V> {
    /// Create an entry with no expiry.
    pub fn new(value: V) -> Self {
        Self {
            value,
            expires_at: None,
            last_accessed: Instant::now(),
        }
    }

    /// Create an entry that expires at the given instant.
    pub fn expiring_at(value: V, expires_at: Instant) -> Self {
        Self {
            value,
            expires_at: Some(expires_at),
            last_accessed: Instant::now(),
        }
    }

    /// Whether the entry has expired as of now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Whether the entry has expired at a given instant.
    ///
    /// Useful for sweeping many entries against one clock reading.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) => now >= deadline,
            None => false,
        }
    }

    /// Mark the entry as just accessed.
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }
}
