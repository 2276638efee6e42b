//! Invoice Ledger Library
//! # Overview
//!
//! This library provides a CSV-driven invoice lifecycle engine: invoices are
//! created, paid down, swept for overdue handling, updated, and deleted, with
//! the final invoice table written as CSV.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Invoice, Command, errors)
//! - [`cli`] - CLI argument parsing
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - The invoice lifecycle state machine
//!   - [`core::memory_store`] - Single-threaded HashMap-backed store
//!   - [`core::shared_store`] - Thread-safe DashMap-backed store
//! - [`io`] - CSV reading and writing
//! - [`runner`] - Pipeline wiring reader, ledger, and writer together
//!
//! # Commands
//!
//! The ledger supports five command types:
//!
//! - **Create**: Open a new pending invoice with an outstanding amount
//! - **Pay**: Apply a payment; the outstanding amount shrinks and the invoice
//!   settles when it reaches zero (overpayments are rejected without effect)
//! - **Sweep**: Close every overdue pending invoice and spawn a successor
//!   carrying the outstanding amount plus a late fee
//! - **Update**: Replace an invoice record wholesale (absent ids are logged
//!   and skipped)
//! - **Delete**: Remove an invoice (no-op if absent)
//!
//! # Invoice States
//!
//! Each invoice tracks:
//! - `amount`: The outstanding balance still owed
//! - `paid_amount`: The cumulative total paid so far
//! - `due_date`: When payment is due
//! - `status`: `pending`, `paid`, or `voided` (the latter two are terminal)

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod runner;
pub mod types;

pub use crate::core::{
    Clock, FixedClock, InvoiceLedger, InvoiceStore, MemoryStore, SharedStore, SystemClock,
};
pub use crate::io::write_invoices_csv;
pub use crate::types::{
    Command, Invoice, InvoiceId, InvoiceStatus, LedgerError, NewInvoice, StoreError,
};
