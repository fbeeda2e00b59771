//! Catalog and audit-trail record types.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Catalog item identifier.
pub type ItemId = u32;

/// Cache key for an item snapshot.
pub(crate) fn item_cache_key(item_id: ItemId) -> String {
    format!("item:{item_id}")
}

/// One catalog entry, owned exclusively by the ledger.
///
/// `stock` is the total units owned; `reserved` is the units promised to
/// open orders. Both are signed so arithmetic on them cannot underflow,
/// but under normal operation `0 <= reserved <= stock` holds throughout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_id: ItemId,
    pub name: String,
    pub sku: String,
    pub stock: i64,
    pub reserved: i64,
}

impl InventoryItem {
    pub fn new(
        item_id: ItemId,
        name: impl Into<String>,
        sku: impl Into<String>,
        stock: i64,
        reserved: i64,
    ) -> Self {
        Self {
            item_id,
            name: name.into(),
            sku: sku.into(),
            stock,
            reserved,
        }
    }

    /// Units actually sellable right now.
    pub fn available(&self) -> i64 {
        self.stock - self.reserved
    }
}

/// What `get_item` returns and what the read cache stores: a copy of the
/// item with `available` computed and a retrieval stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub item_id: ItemId,
    pub name: String,
    pub sku: String,
    pub stock: i64,
    pub reserved: i64,
    pub available: i64,
    pub retrieved_at: DateTime<Utc>,
}

impl ItemSnapshot {
    pub(crate) fn of(item: &InventoryItem) -> Self {
        Self {
            item_id: item.item_id,
            name: item.name.clone(),
            sku: item.sku.clone(),
            stock: item.stock,
            reserved: item.reserved,
            available: item.available(),
            retrieved_at: Utc::now(),
        }
    }
}

/// A live commitment of quantities to one order, created whole by
/// `reserve_items` and deleted whole by `release_reservation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    /// Per-item reserved quantity, in request order.
    pub items: IndexMap<ItemId, i64>,
    pub created_at: DateTime<Utc>,
}

/// Immutable audit record of one stock adjustment. Append-only; the log
/// grows unbounded for the life of the process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentLogEntry {
    pub item_id: ItemId,
    pub old_stock: i64,
    pub new_stock: i64,
    pub delta: i64,
    pub reason: String,
    pub timestamp: DateTime<Utc>,
}

/// The ten-item bootstrap catalog used by tests and the demo binaries.
/// A real deployment would load the catalog from a durable store instead.
pub fn demo_catalog() -> Vec<InventoryItem> {
    vec![
        InventoryItem::new(1001, "Laptop Pro 15\"", "LAP-PRO-15", 47, 3),
        InventoryItem::new(1002, "Wireless Mouse", "MSE-WRL-01", 234, 12),
        InventoryItem::new(1003, "Mechanical Keyboard", "KBD-MCH-01", 89, 5),
        InventoryItem::new(1004, "USB-C Hub", "HUB-USC-01", 156, 8),
        InventoryItem::new(1005, "27\" Monitor 4K", "MON-27-4K", 23, 2),
        InventoryItem::new(1006, "Webcam HD Pro", "WBC-HD-PRO", 78, 6),
        InventoryItem::new(1007, "Desk Lamp LED", "LMP-DSK-LED", 142, 4),
        InventoryItem::new(1008, "Cable Organizer", "ORG-CBL-01", 8, 1),
        InventoryItem::new(1009, "Laptop Stand", "STD-LAP-01", 5, 0),
        InventoryItem::new(1010, "Headphones Noise Cancel", "HDP-NC-01", 112, 15),
    ]
}
