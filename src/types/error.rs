//! Error types for the invoice ledger
//!
//! Two layers of errors mirror the two layers of the system:
//!
//! - [`StoreError`] - failures raised by the persistence store collaborator.
//! - [`LedgerError`] - failures raised by the ledger itself: invalid
//!   arguments, hard not-found lookups, and store failures wrapped with the
//!   operation and invoice id needed to diagnose them.
//!
//! The ledger never swallows a store failure and never retries; transient
//! errors are the store's concern.

use super::invoice::InvoiceId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure raised by a persistence store implementation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// `update` was asked to replace a record that does not exist
    #[error("No record with id {id}")]
    MissingRecord {
        /// The absent invoice id
        id: InvoiceId,
    },

    /// Any other backend failure (connection, serialization, exhausted id
    /// space, ...)
    #[error("Store backend error: {message}")]
    Backend {
        /// Description of the backend failure
        message: String,
    },
}

impl StoreError {
    /// Create a MissingRecord error
    pub fn missing_record(id: InvoiceId) -> Self {
        StoreError::MissingRecord { id }
    }

    /// Create a Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
        }
    }
}

/// Main error type for ledger operations
///
/// Each variant carries enough context (operation name, invoice id, offending
/// value) to diagnose the failure from the error message alone.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// A negative monetary value was supplied
    ///
    /// Raised by `create_invoice`, `pay_invoice` (payment amount),
    /// `process_overdue` (late fee), and `update_invoice` (either monetary
    /// field). Balances are non-negative at all times, so negative inputs
    /// are rejected up front.
    #[error("Negative amount {amount} supplied to {operation}")]
    NegativeAmount {
        /// Operation that rejected the value
        operation: String,
        /// The offending value
        amount: Decimal,
    },

    /// A negative grace period was supplied to the overdue sweep
    #[error("Invalid overdue grace period: {days} days")]
    InvalidOverdueDays {
        /// The offending day count
        days: i64,
    },

    /// A balance computation would overflow
    ///
    /// Rejected instead of applied to keep the stored balances intact.
    #[error("Arithmetic overflow in {operation} for invoice {id}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Invoice whose balance was being computed
        id: InvoiceId,
    },

    /// The referenced invoice does not exist
    ///
    /// Raised by `pay_invoice` and `get_invoice`. Note the deliberate
    /// asymmetry: `update_invoice` on an absent id is a logged no-op, and
    /// `delete_invoice` on an absent id succeeds silently.
    #[error("Invoice {id} not found for {operation}")]
    InvoiceNotFound {
        /// The absent invoice id
        id: InvoiceId,
        /// Operation that failed
        operation: String,
    },

    /// A persistence failure, propagated unchanged with call-site context
    #[error("Store failure in {operation}{}: {source}", id.map(|i| format!(" for invoice {}", i)).unwrap_or_default())]
    Store {
        /// Operation that hit the failure
        operation: String,
        /// Invoice the operation was acting on, when there is one
        id: Option<InvoiceId>,
        /// The underlying store error
        #[source]
        source: StoreError,
    },
}

impl LedgerError {
    /// Create a NegativeAmount error
    pub fn negative_amount(operation: &str, amount: Decimal) -> Self {
        LedgerError::NegativeAmount {
            operation: operation.to_string(),
            amount,
        }
    }

    /// Create an InvoiceNotFound error
    pub fn not_found(id: InvoiceId, operation: &str) -> Self {
        LedgerError::InvoiceNotFound {
            id,
            operation: operation.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, id: InvoiceId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            id,
        }
    }

    /// Wrap a store failure with the operation and invoice context
    pub fn store(operation: &str, id: Option<InvoiceId>, source: StoreError) -> Self {
        LedgerError::Store {
            operation: operation.to_string(),
            id,
            source,
        }
    }
}
