//! # Inventory Ledger
//!
//! A thread-safe, in-memory inventory ledger with atomic multi-item
//! reservations and a short-lived read-through cache that never serves
//! stale data after a mutation.
//!
//! ## Components
//!
//! - [`Cache`]: a generic, time-bounded key/value store with lazy TTL
//!   expiry, optional LRU capacity, and hit/miss accounting. It knows
//!   nothing about inventory.
//! - [`InventoryLedger`]: the authoritative stock record. One internal
//!   lock serializes every operation; the cache accelerates `get_item`
//!   and every mutation invalidates the affected keys before returning.
//!
//! ## Quick start
//!
//! ```rust
//! use inventory_ledger::InventoryLedger;
//!
//! let ledger = InventoryLedger::demo();
//!
//! // Item 1001 starts with stock 47, reserved 3.
//! let item = ledger.get_item(1001).unwrap();
//! assert_eq!(item.available, 44);
//!
//! // Reserve atomically across items: all pairs commit or none do.
//! let receipt = ledger.reserve_items("order-1", &[(1001, 5), (1002, 2)]).unwrap();
//! assert_eq!(receipt.items_reserved, 2);
//!
//! // A re-read after the mutation is guaranteed fresh.
//! assert_eq!(ledger.get_item(1001).unwrap().reserved, 8);
//!
//! ledger.release_reservation("order-1").unwrap();
//! assert_eq!(ledger.get_item(1001).unwrap().reserved, 3);
//! ```
//!
//! ## Thread safety
//!
//! Both [`Cache`] and [`InventoryLedger`] are cheap-to-clone handles over
//! shared state:
//!
//! ```rust
//! use inventory_ledger::InventoryLedger;
//! use std::thread;
//!
//! let ledger = InventoryLedger::demo();
//!
//! let handles: Vec<_> = (0..4).map(|i| {
//!     let ledger = ledger.clone();
//!     thread::spawn(move || {
//!         ledger.reserve_items(&format!("order-{i}"), &[(1002, 1)]).unwrap();
//!     })
//! }).collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(ledger.get_item(1002).unwrap().reserved, 16);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod item;
pub mod ledger;
pub mod stats;

pub use cache::Cache;
pub use config::CacheConfig;
pub use error::{LedgerError, LedgerResult, ProtocolError};
pub use item::{demo_catalog, AdjustmentLogEntry, InventoryItem, ItemId, ItemSnapshot};
pub use ledger::{
    AdjustmentReceipt, InventoryLedger, LowStockItem, ReleaseReceipt, ReservationReceipt,
    DEFAULT_ITEM_TTL,
};
pub use stats::{CacheStats, CacheStatus};

// Internal cache plumbing.
pub(crate) mod entry;
pub(crate) mod storage;

// Demo server/client plumbing.
pub mod cli;
pub mod command;
pub mod wire;

pub use cli::{Cli, ClientCommand};
pub use command::Command;
