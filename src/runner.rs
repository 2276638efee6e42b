//! Command pipeline
//!
//! Orchestrates a full run: stream command rows from the input CSV, drive the
//! ledger one command at a time, then write the final invoice table to the
//! output writer.
//!
//! # Error Handling
//!
//! Fatal errors (file not found, I/O errors while writing output) are returned
//! immediately. Individual command errors are logged and processing continues
//! with the next row, so one bad row never discards the rest of the file.
//!
//! # Memory
//!
//! Input is streamed record by record; memory usage is O(invoices), not
//! O(commands).

use crate::cli::StoreKind;
use crate::core::{Clock, FixedClock, InvoiceLedger, InvoiceStore, MemoryStore, SharedStore, SystemClock};
use crate::io::csv_format::write_invoices_csv;
use crate::io::reader::CommandReader;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;

/// Process commands from the input file and write the final invoice table
///
/// The store backend and clock are chosen by the caller: `store` selects the
/// backend, and `now` pins the ledger clock to a fixed instant when present
/// (otherwise the system clock is used).
pub fn run(
    input_path: &Path,
    output: &mut dyn Write,
    store: StoreKind,
    now: Option<DateTime<Utc>>,
) -> Result<(), String> {
    match (store, now) {
        (StoreKind::Memory, Some(instant)) => drive(
            input_path,
            output,
            InvoiceLedger::new(MemoryStore::new(), FixedClock::new(instant)),
        ),
        (StoreKind::Memory, None) => drive(
            input_path,
            output,
            InvoiceLedger::new(MemoryStore::new(), SystemClock),
        ),
        (StoreKind::Shared, Some(instant)) => drive(
            input_path,
            output,
            InvoiceLedger::new(SharedStore::new(), FixedClock::new(instant)),
        ),
        (StoreKind::Shared, None) => drive(
            input_path,
            output,
            InvoiceLedger::new(SharedStore::new(), SystemClock),
        ),
    }
}

fn drive<S: InvoiceStore, C: Clock>(
    input_path: &Path,
    output: &mut dyn Write,
    mut ledger: InvoiceLedger<S, C>,
) -> Result<(), String> {
    let reader = CommandReader::new(input_path)?;

    for result in reader {
        match result {
            Ok(command) => {
                let op = command.op_name();
                // Individual command failures are recoverable; log and move on
                if let Err(e) = ledger.apply(command) {
                    tracing::error!(op, error = %e, "command failed");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed row");
            }
        }
    }

    let invoices = ledger.list_invoices().map_err(|e| e.to_string())?;
    write_invoices_csv(&invoices, output)?;

    Ok(())
}
