//! Command-line interface for the demo client.

use clap::{Parser, Subcommand};

/// Inventory ledger client.
///
/// A CLI for talking to a running ledger server.
#[derive(Parser, Debug)]
#[command(name = "ledger-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The command to execute.
    #[clap(subcommand)]
    pub command: ClientCommand,
}

/// Available client commands.
#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Fetch an item snapshot.
    Item {
        /// Catalog item id.
        item_id: u32,
    },

    /// Check whether a quantity of an item is available.
    Check {
        /// Catalog item id.
        item_id: u32,
        /// Requested quantity.
        quantity: i64,
    },

    /// Reserve items for an order.
    ///
    /// Pairs are given as id:quantity, e.g. `reserve order-1 1001:5 1002:2`.
    /// The whole reservation commits or none of it does.
    Reserve {
        /// Order identifier.
        order_id: String,
        /// One or more id:quantity pairs, validated in the given order.
        #[arg(required = true)]
        pairs: Vec<String>,
    },

    /// Release an order's reservation.
    Release {
        /// Order identifier.
        order_id: String,
    },

    /// Adjust an item's stock level (restock, damage, theft).
    Adjust {
        /// Catalog item id.
        item_id: u32,
        /// Signed stock delta.
        #[arg(allow_hyphen_values = true)]
        delta: i64,
        /// Free-text reason, recorded in the audit log.
        #[arg(required = true)]
        reason: Vec<String>,
    },

    /// List items at or below an availability threshold.
    LowStock {
        /// Availability threshold (default 10).
        #[arg(default_value_t = 10)]
        threshold: i64,
    },

    /// Show cache counters.
    Stats,

    /// Ping the server.
    Ping,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_item() {
        let cli = Cli::parse_from(["test", "item", "1001"]);
        match cli.command {
            ClientCommand::Item { item_id } => assert_eq!(item_id, 1001),
            _ => panic!("expected Item command"),
        }
    }

    #[test]
    fn parse_check() {
        let cli = Cli::parse_from(["test", "check", "1001", "44"]);
        match cli.command {
            ClientCommand::Check { item_id, quantity } => {
                assert_eq!(item_id, 1001);
                assert_eq!(quantity, 44);
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_reserve_with_pairs() {
        let cli = Cli::parse_from(["test", "reserve", "order-1", "1001:5", "1002:2"]);
        match cli.command {
            ClientCommand::Reserve { order_id, pairs } => {
                assert_eq!(order_id, "order-1");
                assert_eq!(pairs, vec!["1001:5", "1002:2"]);
            }
            _ => panic!("expected Reserve command"),
        }
    }

    #[test]
    fn reserve_requires_at_least_one_pair() {
        assert!(Cli::try_parse_from(["test", "reserve", "order-1"]).is_err());
    }

    #[test]
    fn parse_adjust_with_negative_delta() {
        let cli = Cli::parse_from(["test", "adjust", "1001", "-10", "damaged", "in", "transit"]);
        match cli.command {
            ClientCommand::Adjust {
                item_id,
                delta,
                reason,
            } => {
                assert_eq!(item_id, 1001);
                assert_eq!(delta, -10);
                assert_eq!(reason.join(" "), "damaged in transit");
            }
            _ => panic!("expected Adjust command"),
        }
    }

    #[test]
    fn parse_low_stock_default_threshold() {
        let cli = Cli::parse_from(["test", "low-stock"]);
        match cli.command {
            ClientCommand::LowStock { threshold } => assert_eq!(threshold, 10),
            _ => panic!("expected LowStock command"),
        }
    }
}
