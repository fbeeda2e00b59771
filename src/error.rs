//! Error taxonomy for ledger operations and the demo wire protocol.
//!
//! Every ledger failure here is an expected outcome the caller branches
//! on, not a fault: the ledger refuses the operation, leaves its state
//! untouched, and reports why as data.

use thiserror::Error;

use crate::item::ItemId;

/// A refused ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The referenced item id is not in the catalog.
    #[error("item {item_id} not found")]
    ItemNotFound { item_id: ItemId },

    /// No live reservation exists for the order id.
    #[error("no reservation found for order '{order_id}'")]
    ReservationNotFound { order_id: String },

    /// The order id already has a live reservation.
    #[error("order '{order_id}' already has a reservation")]
    DuplicateReservation { order_id: String },

    /// A reservation pair carried a zero or negative quantity. Refused
    /// outright: a non-positive reservation would corrupt the reserved
    /// counter.
    #[error("reservation quantity for item {item_id} must be positive (got {requested})")]
    InvalidQuantity { item_id: ItemId, requested: i64 },

    /// A reservation request asked for more than is available. Reported
    /// for the first failing pair; nothing was committed.
    #[error("insufficient inventory for item {item_id}: requested {requested}, available {available}")]
    InsufficientInventory {
        item_id: ItemId,
        requested: i64,
        available: i64,
    },

    /// An adjustment would drive stock below zero.
    #[error("adjustment {delta:+} would drive item {item_id} below zero (stock {current_stock})")]
    NegativeStockViolation {
        item_id: ItemId,
        current_stock: i64,
        delta: i64,
    },
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// A malformed request on the demo server's line protocol, rejected
/// before it reaches the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("invalid {what}: '{input}'")]
    InvalidArgument { what: &'static str, input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_errors_render_for_wire_responses() {
        let err = LedgerError::InsufficientInventory {
            item_id: 1001,
            requested: 1000,
            available: 44,
        };
        assert_eq!(
            err.to_string(),
            "insufficient inventory for item 1001: requested 1000, available 44"
        );

        let err = LedgerError::NegativeStockViolation {
            item_id: 1001,
            current_stock: 47,
            delta: -10000,
        };
        assert_eq!(
            err.to_string(),
            "adjustment -10000 would drive item 1001 below zero (stock 47)"
        );
    }

    #[test]
    fn protocol_errors_name_the_bad_input() {
        let err = ProtocolError::InvalidArgument {
            what: "item pair",
            input: "1001x5".to_string(),
        };
        assert_eq!(err.to_string(), "invalid item pair: '1001x5'");
    }
}
