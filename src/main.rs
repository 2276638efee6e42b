//! Invoice Ledger CLI
//!
//! Command-line interface for processing invoice lifecycle commands from CSV
//! files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- commands.csv > invoices.csv
//! cargo run -- --store shared commands.csv > invoices.csv
//! cargo run -- --now 2026-08-30T00:00:00Z commands.csv > invoices.csv
//! ```
//!
//! The program reads command rows from the input CSV file, drives them through
//! the invoice ledger, and writes the final invoice table to stdout. Logs go
//! to stderr so stdout stays clean CSV; verbosity is controlled via `RUST_LOG`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use invoice_ledger::cli;
use invoice_ledger::runner;
use std::process;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    let args = cli::parse_args();

    let mut output = std::io::stdout();
    if let Err(e) = runner::run(&args.input_file, &mut output, args.store, args.now) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
