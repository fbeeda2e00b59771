//! Verb vocabulary for the demo server's line protocol.

use crate::error::ProtocolError;

/// Requests the demo server understands. Each maps onto one ledger
/// operation, plus `Ping` and `Stats` for liveness and observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Fetch an item snapshot.
    Item,
    /// Check availability of a quantity of one item.
    Check,
    /// Reserve quantities of items for an order.
    Reserve,
    /// Release an order's reservation.
    Release,
    /// Adjust an item's stock with a reason.
    Adjust,
    /// List items at or below an availability threshold.
    LowStock,
    /// Report cache counters.
    Stats,
    /// Liveness check.
    Ping,
}

impl Command {
    /// Parse a verb, case-insensitively.
    pub fn parse(verb: &str) -> Result<Command, ProtocolError> {
        match verb.to_ascii_lowercase().as_str() {
            "item" | "get" => Ok(Command::Item),
            "check" => Ok(Command::Check),
            "reserve" => Ok(Command::Reserve),
            "release" => Ok(Command::Release),
            "adjust" => Ok(Command::Adjust),
            "lowstock" | "low-stock" => Ok(Command::LowStock),
            "stats" | "info" => Ok(Command::Stats),
            "ping" => Ok(Command::Ping),
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Item => "item",
            Command::Check => "check",
            Command::Reserve => "reserve",
            Command::Release => "release",
            Command::Adjust => "adjust",
            Command::LowStock => "lowstock",
            Command::Stats => "stats",
            Command::Ping => "ping",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
