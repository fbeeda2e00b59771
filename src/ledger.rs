//! The authoritative inventory ledger.
//!
//! One mutex guards all ledger state (catalog, live reservations, audit
//! log), so every operation, reads included, runs fully serialized. The
//! read cache in front of `get_item` has its own lock; consistency rests
//! on mutations invalidating the affected cache keys before they return,
//! which here happens while the ledger lock is still held. Any caller
//! that re-reads after a completed mutation therefore misses the cache
//! and recomputes from live state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};

use crate::cache::Cache;
use crate::error::{LedgerError, LedgerResult};
use crate::item::{
    demo_catalog, item_cache_key, AdjustmentLogEntry, InventoryItem, ItemId, ItemSnapshot,
    Reservation,
};
use crate::stats::CacheStatus;

/// How long a cached item snapshot stays fresh.
pub const DEFAULT_ITEM_TTL: Duration = Duration::from_secs(60);

/// Outcome of a committed reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationReceipt {
    pub order_id: String,
    pub items_reserved: usize,
    /// Per-item reserved quantity, in request order. Repeated item ids in
    /// the request are aggregated.
    pub reserved: IndexMap<ItemId, i64>,
}

/// Outcome of a released reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseReceipt {
    pub order_id: String,
    pub items_released: usize,
}

/// Outcome of a committed stock adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjustmentReceipt {
    pub item_id: ItemId,
    pub old_stock: i64,
    pub new_stock: i64,
    pub delta: i64,
}

/// One row of a low-stock report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockItem {
    pub item_id: ItemId,
    pub name: String,
    pub sku: String,
    pub stock: i64,
    pub reserved: i64,
    pub available: i64,
}

#[derive(Debug)]
struct State {
    catalog: IndexMap<ItemId, InventoryItem>,
    reservations: HashMap<String, Reservation>,
    adjustment_log: Vec<AdjustmentLogEntry>,
}

#[derive(Debug)]
struct Inner {
    state: Mutex<State>,
    cache: Cache<ItemSnapshot>,
    item_ttl: Duration,
}

/// Shared handle to the authoritative stock record.
///
/// Cloning yields another handle to the same ledger; there is no global
/// state. All six operations are synchronous and serialized by a single
/// internal lock, so concurrent callers see a strict one-operation-at-a-
/// time resource. Every failure kind is returned as data, never panicked.
///
/// # Example
/// ```
/// use inventory_ledger::InventoryLedger;
///
/// let ledger = InventoryLedger::demo();
///
/// assert!(ledger.check_availability(1001, 44));
/// let receipt = ledger.reserve_items("order-1", &[(1001, 5)]).unwrap();
/// assert_eq!(receipt.items_reserved, 1);
/// ledger.release_reservation("order-1").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct InventoryLedger {
    inner: Arc<Inner>,
}

impl InventoryLedger {
    /// Build a ledger over a seed catalog and a caller-supplied cache.
    ///
    /// The caller keeps its own clone of `cache` if it wants to observe
    /// hit/miss counters directly; [`InventoryLedger::cache_status`]
    /// covers the common case.
    pub fn new(catalog: Vec<InventoryItem>, cache: Cache<ItemSnapshot>) -> Self {
        Self::with_item_ttl(catalog, cache, DEFAULT_ITEM_TTL)
    }

    /// Like [`InventoryLedger::new`] with an explicit snapshot TTL.
    pub fn with_item_ttl(
        catalog: Vec<InventoryItem>,
        cache: Cache<ItemSnapshot>,
        item_ttl: Duration,
    ) -> Self {
        let catalog: IndexMap<ItemId, InventoryItem> =
            catalog.into_iter().map(|item| (item.item_id, item)).collect();

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    catalog,
                    reservations: HashMap::new(),
                    adjustment_log: Vec::new(),
                }),
                cache,
                item_ttl,
            }),
        }
    }

    /// A ledger seeded with the bootstrap catalog and a fresh cache.
    pub fn demo() -> Self {
        Self::new(demo_catalog(), Cache::default())
    }

    /// The ledger lock only guards plain data, so a panic mid-operation
    /// cannot leave it torn in a way recovery would expose.
    fn state(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of one item, served read-through.
    ///
    /// The cache is consulted first; on a miss the snapshot is built and
    /// cached under the ledger lock, so a concurrent mutation cannot
    /// slip a stale fill past its own invalidation. Unknown ids are never
    /// cached.
    pub fn get_item(&self, item_id: ItemId) -> LedgerResult<ItemSnapshot> {
        let key = item_cache_key(item_id);
        if let Some(snapshot) = self.inner.cache.get(&key) {
            debug!(item_id, "item snapshot served from cache");
            return Ok(snapshot);
        }

        let state = self.state();
        let item = state
            .catalog
            .get(&item_id)
            .ok_or(LedgerError::ItemNotFound { item_id })?;

        let snapshot = ItemSnapshot::of(item);
        self.inner
            .cache
            .set_with_ttl(key, snapshot.clone(), self.inner.item_ttl);
        debug!(item_id, "item snapshot cached");
        Ok(snapshot)
    }

    /// Whether `quantity` units of an item are available right now.
    ///
    /// Computed against live state, never the cache. Unknown ids read as
    /// unavailable rather than an error.
    pub fn check_availability(&self, item_id: ItemId, quantity: i64) -> bool {
        let state = self.state();
        match state.catalog.get(&item_id) {
            Some(item) => item.available() >= quantity,
            None => false,
        }
    }

    /// Atomically reserve quantities of several items for one order.
    ///
    /// Every pair is validated, in request order, before anything is
    /// mutated; the first pair that cannot be satisfied aborts the whole
    /// call and nothing is committed. Quantities must be positive, and an
    /// unknown item id in a pair reads as zero availability. On success
    /// each touched item's cache entry is invalidated before the call
    /// returns.
    pub fn reserve_items(
        &self,
        order_id: &str,
        pairs: &[(ItemId, i64)],
    ) -> LedgerResult<ReservationReceipt> {
        let mut state = self.state();

        if state.reservations.contains_key(order_id) {
            return Err(LedgerError::DuplicateReservation {
                order_id: order_id.to_string(),
            });
        }

        // All-or-nothing: validate the full request before touching state.
        for &(item_id, requested) in pairs {
            if requested <= 0 {
                return Err(LedgerError::InvalidQuantity { item_id, requested });
            }
            let available = state
                .catalog
                .get(&item_id)
                .map(InventoryItem::available)
                .unwrap_or(0);
            if available < requested {
                return Err(LedgerError::InsufficientInventory {
                    item_id,
                    requested,
                    available,
                });
            }
        }

        let mut reserved: IndexMap<ItemId, i64> = IndexMap::with_capacity(pairs.len());
        for &(item_id, quantity) in pairs {
            if let Some(item) = state.catalog.get_mut(&item_id) {
                item.reserved = item.reserved.saturating_add(quantity);
            }
            let slot = reserved.entry(item_id).or_insert(0);
            *slot = slot.saturating_add(quantity);
            self.inner.cache.delete(&item_cache_key(item_id));
            info!(order_id, item_id, quantity, "reserved units");
        }

        state.reservations.insert(
            order_id.to_string(),
            Reservation {
                items: reserved.clone(),
                created_at: Utc::now(),
            },
        );

        Ok(ReservationReceipt {
            order_id: order_id.to_string(),
            items_reserved: reserved.len(),
            reserved,
        })
    }

    /// Release a live reservation, returning every unit it held.
    ///
    /// The reservation record is deleted whole; each touched item's cache
    /// entry is invalidated before the call returns.
    pub fn release_reservation(&self, order_id: &str) -> LedgerResult<ReleaseReceipt> {
        let mut state = self.state();

        let reservation =
            state
                .reservations
                .remove(order_id)
                .ok_or_else(|| LedgerError::ReservationNotFound {
                    order_id: order_id.to_string(),
                })?;

        for (&item_id, &quantity) in &reservation.items {
            if let Some(item) = state.catalog.get_mut(&item_id) {
                item.reserved = item.reserved.saturating_sub(quantity);
            }
            self.inner.cache.delete(&item_cache_key(item_id));
            info!(order_id, item_id, quantity, "released units");
        }

        Ok(ReleaseReceipt {
            order_id: order_id.to_string(),
            items_released: reservation.items.len(),
        })
    }

    /// Adjust an item's stock by a signed delta (restock, damage, theft),
    /// appending an audit entry and invalidating the item's cache entry.
    ///
    /// A delta that would drive stock below zero is refused. Note that
    /// `reserved <= new_stock` is deliberately not re-checked: a large
    /// negative delta can leave more units reserved than owned, matching
    /// the system this ledger is accountable to.
    pub fn adjust_inventory(
        &self,
        item_id: ItemId,
        delta: i64,
        reason: &str,
    ) -> LedgerResult<AdjustmentReceipt> {
        let mut state = self.state();

        let item = state
            .catalog
            .get_mut(&item_id)
            .ok_or(LedgerError::ItemNotFound { item_id })?;

        let old_stock = item.stock;
        // Saturating so an extreme delta clamps rather than overflowing;
        // a clamp to i64::MIN is then refused as negative below.
        let new_stock = old_stock.saturating_add(delta);
        if new_stock < 0 {
            return Err(LedgerError::NegativeStockViolation {
                item_id,
                current_stock: old_stock,
                delta,
            });
        }

        item.stock = new_stock;
        state.adjustment_log.push(AdjustmentLogEntry {
            item_id,
            old_stock,
            new_stock,
            delta,
            reason: reason.to_string(),
            timestamp: Utc::now(),
        });
        self.inner.cache.delete(&item_cache_key(item_id));

        info!(item_id, old_stock, new_stock, reason, "stock adjusted");
        Ok(AdjustmentReceipt {
            item_id,
            old_stock,
            new_stock,
            delta,
        })
    }

    /// Items whose availability is at or below `threshold`, sorted
    /// ascending by availability. The sort is stable, so ties keep
    /// catalog order.
    pub fn get_low_stock_items(&self, threshold: i64) -> Vec<LowStockItem> {
        let state = self.state();

        let mut rows: Vec<LowStockItem> = state
            .catalog
            .values()
            .filter(|item| item.available() <= threshold)
            .map(|item| LowStockItem {
                item_id: item.item_id,
                name: item.name.clone(),
                sku: item.sku.clone(),
                stock: item.stock,
                reserved: item.reserved,
                available: item.available(),
            })
            .collect();

        rows.sort_by_key(|row| row.available);
        rows
    }

    /// Read cache counters, for observability only.
    pub fn cache_status(&self) -> CacheStatus {
        self.inner.cache.status()
    }

    /// Copy of the append-only adjustment audit trail.
    pub fn adjustment_history(&self) -> Vec<AdjustmentLogEntry> {
        self.state().adjustment_log.clone()
    }

    /// Number of live reservations.
    pub fn live_reservations(&self) -> usize {
        self.state().reservations.len()
    }
}
