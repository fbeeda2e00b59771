//! Demo ledger client.
//!
//! Builds a protocol line from the CLI arguments, sends it to a running
//! server, and prints the response.

use bytes::BytesMut;
use clap::Parser;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};

use inventory_ledger::cli::{Cli, ClientCommand};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5003;

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    let addr = format!("{DEFAULT_HOST}:{DEFAULT_PORT}");
    let mut stream = match TcpStream::connect(&addr).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to connect to server at {addr}: {e}");
            eprintln!("Make sure the server is running with: cargo run --bin server");
            std::process::exit(1);
        }
    };

    let request = match args.command {
        ClientCommand::Item { item_id } => format!("item {item_id}"),
        ClientCommand::Check { item_id, quantity } => format!("check {item_id} {quantity}"),
        ClientCommand::Reserve { order_id, pairs } => {
            format!("reserve {order_id} {}", pairs.join(" "))
        }
        ClientCommand::Release { order_id } => format!("release {order_id}"),
        ClientCommand::Adjust {
            item_id,
            delta,
            reason,
        } => format!("adjust {item_id} {delta} {}", reason.join(" ")),
        ClientCommand::LowStock { threshold } => format!("lowstock {threshold}"),
        ClientCommand::Stats => "stats".to_string(),
        ClientCommand::Ping => "ping".to_string(),
    };

    stream.write_all(request.as_bytes()).await?;

    let mut buf = BytesMut::with_capacity(4096);
    let _ = stream.read_buf(&mut buf).await?;

    let response = match std::str::from_utf8(&buf) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Failed to parse response: {e}");
            std::process::exit(1);
        }
    };

    if response.starts_with("ERR") {
        eprintln!("{response}");
        std::process::exit(1);
    }

    if request == "stats" {
        println!("Cache status:");
        for part in response.split_whitespace() {
            if let Some((key, value)) = part.split_once(':') {
                println!("  {key}: {value}");
            }
        }
    } else {
        println!("{response}");
    }

    Ok(())
}
