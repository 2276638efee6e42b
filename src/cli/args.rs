use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Process invoice lifecycle commands from a CSV file
#[derive(Parser, Debug)]
#[command(name = "invoice-ledger")]
#[command(about = "Process invoice lifecycle commands from a CSV file", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing command rows
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Store backend holding the invoice records
    #[arg(
        long = "store",
        value_name = "STORE",
        default_value = "memory",
        help = "Store backend: 'memory' (single-threaded) or 'shared' (thread-safe)"
    )]
    pub store: StoreKind,

    /// Pin the ledger clock to a fixed instant
    ///
    /// Overdue sweeps compare due dates against this instant instead of the
    /// wall clock, making runs reproducible.
    #[arg(
        long = "now",
        value_name = "TIMESTAMP",
        value_parser = parse_rfc3339,
        help = "Fix the clock to an RFC 3339 timestamp (default: system time)"
    )]
    pub now: Option<DateTime<Utc>>,
}

/// Available store backends
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Memory,
    Shared,
}

fn parse_rfc3339(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{}': {}", raw, e))
}
