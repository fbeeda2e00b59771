//! Demo ledger server.
//!
//! Accepts one space-delimited request per connection and answers with
//! JSON (snapshots, receipts) or a short status line. This is a demo
//! harness for exercising the ledger concurrently, not a production
//! transport.

use bytes::BytesMut;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    signal,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use inventory_ledger::error::ProtocolError;
use inventory_ledger::wire;
use inventory_ledger::{Command, InventoryLedger};

struct ServerConfig {
    host: String,
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5003,
        }
    }
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::default();
    let ledger = InventoryLedger::demo();

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "ledger server listening");

    let shutdown_ledger = ledger.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            let status = shutdown_ledger.cache_status();
            info!(
                hits = status.hits,
                misses = status.misses,
                entries = status.entries,
                "shutting down"
            );
            std::process::exit(0);
        }
    });

    loop {
        match listener.accept().await {
            Ok((socket, peer)) => {
                let ledger = ledger.clone();
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(socket, ledger).await {
                        warn!(%peer, "connection error: {e}");
                    }
                });
            }
            Err(e) => {
                error!("failed to accept connection: {e}");
            }
        }
    }
}

/// Read one request from the socket, dispatch it, write the response.
async fn handle_connection(
    mut socket: TcpStream,
    ledger: InventoryLedger,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut buf = BytesMut::with_capacity(1024);

    let n = socket.read_buf(&mut buf).await?;
    if n == 0 {
        return Ok(()); // connection closed
    }

    let tokens = wire::tokenize(&mut buf);
    let response = dispatch(&tokens, &ledger);

    socket.write_all(response.as_bytes()).await?;
    Ok(())
}

/// Map a tokenized request onto a ledger operation and render the result.
fn dispatch(tokens: &[String], ledger: &InventoryLedger) -> String {
    match process(tokens, ledger) {
        Ok(response) => response,
        Err(reason) => format!("ERR {reason}"),
    }
}

fn process(tokens: &[String], ledger: &InventoryLedger) -> Result<String, String> {
    let verb = tokens.first().ok_or("empty command")?;
    let command = Command::parse(verb).map_err(|e| e.to_string())?;
    let args = &tokens[1..];

    match command {
        Command::Item => {
            let item_id = parse_arg(args, 0, "item id", wire::parse_item_id)?;
            let snapshot = ledger.get_item(item_id).map_err(|e| e.to_string())?;
            render_json(&snapshot)
        }

        Command::Check => {
            let item_id = parse_arg(args, 0, "item id", wire::parse_item_id)?;
            let quantity = parse_arg(args, 1, "quantity", wire::parse_quantity)?;
            Ok(ledger.check_availability(item_id, quantity).to_string())
        }

        Command::Reserve => {
            let order_id = args.first().ok_or("missing argument: order id")?;
            let pairs = wire::parse_pairs(&args[1..]).map_err(|e| e.to_string())?;
            let receipt = ledger
                .reserve_items(order_id, &pairs)
                .map_err(|e| e.to_string())?;
            render_json(&receipt)
        }

        Command::Release => {
            let order_id = args.first().ok_or("missing argument: order id")?;
            let receipt = ledger
                .release_reservation(order_id)
                .map_err(|e| e.to_string())?;
            render_json(&receipt)
        }

        Command::Adjust => {
            let item_id = parse_arg(args, 0, "item id", wire::parse_item_id)?;
            let delta = parse_arg(args, 1, "delta", wire::parse_quantity)?;
            let reason = args.get(2..).filter(|r| !r.is_empty()).map(|r| r.join(" "));
            let reason = reason.ok_or("missing argument: reason")?;
            let receipt = ledger
                .adjust_inventory(item_id, delta, &reason)
                .map_err(|e| e.to_string())?;
            render_json(&receipt)
        }

        Command::LowStock => {
            let threshold = match args.first() {
                Some(token) => wire::parse_quantity(token).map_err(|e| e.to_string())?,
                None => 10,
            };
            render_json(&ledger.get_low_stock_items(threshold))
        }

        Command::Stats => {
            let status = ledger.cache_status();
            Ok(format!(
                "hits:{} misses:{} entries:{} hit_rate:{:.1}%",
                status.hits, status.misses, status.entries, status.hit_rate
            ))
        }

        Command::Ping => Ok("PONG".to_string()),
    }
}

fn parse_arg<T>(
    args: &[String],
    index: usize,
    name: &'static str,
    parse: impl Fn(&str) -> Result<T, ProtocolError>,
) -> Result<T, String> {
    let token = args
        .get(index)
        .ok_or_else(|| format!("missing argument: {name}"))?;
    parse(token).map_err(|e| e.to_string())
}

fn render_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("failed to encode response: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn ping_pongs() {
        let ledger = InventoryLedger::demo();
        assert_eq!(dispatch(&tokens("ping"), &ledger), "PONG");
    }

    #[test]
    fn check_renders_boolean() {
        let ledger = InventoryLedger::demo();
        assert_eq!(dispatch(&tokens("check 1001 44"), &ledger), "true");
        assert_eq!(dispatch(&tokens("check 1001 45"), &ledger), "false");
    }

    #[test]
    fn item_renders_snapshot_json() {
        let ledger = InventoryLedger::demo();
        let response = dispatch(&tokens("item 1001"), &ledger);
        assert!(response.contains("\"item_id\":1001"));
        assert!(response.contains("\"available\":44"));
    }

    #[test]
    fn reserve_and_release_round_trip() {
        let ledger = InventoryLedger::demo();

        let response = dispatch(&tokens("reserve O1 1001:5 1002:2"), &ledger);
        assert!(response.contains("\"items_reserved\":2"));

        let response = dispatch(&tokens("release O1"), &ledger);
        assert!(response.contains("\"items_released\":2"));
    }

    #[test]
    fn ledger_refusals_render_as_err_lines() {
        let ledger = InventoryLedger::demo();
        let response = dispatch(&tokens("reserve O1 1001:1000"), &ledger);
        assert!(response.starts_with("ERR insufficient inventory"));

        let response = dispatch(&tokens("item 9999"), &ledger);
        assert_eq!(response, "ERR item 9999 not found");
    }

    #[test]
    fn negative_reserve_quantity_is_rejected_before_the_ledger() {
        let ledger = InventoryLedger::demo();
        let response = dispatch(&tokens("reserve O1 1001:-5"), &ledger);
        assert_eq!(response, "ERR invalid reservation quantity: '1001:-5'");

        // The refused request must not have freed any units.
        assert_eq!(ledger.get_item(1001).unwrap().reserved, 3);
    }

    #[test]
    fn adjust_requires_a_reason() {
        let ledger = InventoryLedger::demo();
        let response = dispatch(&tokens("adjust 1001 100"), &ledger);
        assert_eq!(response, "ERR missing argument: reason");

        let response = dispatch(&tokens("adjust 1001 100 restock delivery"), &ledger);
        assert!(response.contains("\"new_stock\":147"));
    }

    #[test]
    fn lowstock_defaults_threshold() {
        let ledger = InventoryLedger::demo();
        let response = dispatch(&tokens("lowstock"), &ledger);
        assert!(response.starts_with('['));
        assert!(response.contains("\"item_id\":1009"));
    }

    #[test]
    fn unknown_verb_is_rejected() {
        let ledger = InventoryLedger::demo();
        let response = dispatch(&tokens("restock 1001"), &ledger);
        assert_eq!(response, "ERR unknown command 'restock'");
    }

    #[test]
    fn empty_request_is_rejected() {
        let ledger = InventoryLedger::demo();
        assert_eq!(dispatch(&[], &ledger), "ERR empty command");
    }
}
