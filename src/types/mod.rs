//! Types module
//!
//! Contains core data structures used throughout the application:
//! - `invoice`: the invoice record, status lifecycle, and insert payload
//! - `command`: validated ledger instructions produced by the transport
//! - `error`: ledger and store error types

pub mod command;
pub mod error;
pub mod invoice;

pub use command::Command;
pub use error::{LedgerError, StoreError};
pub use invoice::{Invoice, InvoiceId, InvoiceStatus, NewInvoice};
