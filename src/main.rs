//! Entry point stub.
//!
//! This file exists so cargo has a default binary target. Use the server
//! or client binaries instead:
//!
//! ```bash
//! cargo run --bin server
//! cargo run --bin client item 1001
//! ```

fn main() {
    eprintln!("This binary is not intended to be run directly.");
    eprintln!("Use one of the following commands:");
    eprintln!("  cargo run --bin server       - Start the ledger server");
    eprintln!("  cargo run --bin client <cmd> - Run client commands");
    std::process::exit(1);
}
