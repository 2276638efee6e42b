//! Invoice-related types for the invoice ledger
//!
//! This module defines the invoice record, its status lifecycle, and the
//! insert payload used when the store assigns a fresh identifier.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Invoice identifier
///
/// Assigned by the persistence store on insert, monotonically increasing,
/// never reused.
pub type InvoiceId = u32;

/// Invoice status lifecycle
///
/// `Pending` is the only live state. `Paid` and `Voided` are terminal:
/// no operation transitions an invoice out of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    /// Open receivable; payments and overdue processing apply
    Pending,

    /// Settled in full, or closed out by an overdue sweep after a
    /// partial payment. Terminal.
    Paid,

    /// Written off by an overdue sweep with no payment received. Terminal.
    Voided,
}

impl InvoiceStatus {
    /// Whether this status still accepts lifecycle transitions
    pub fn is_terminal(&self) -> bool {
        !matches!(self, InvoiceStatus::Pending)
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Voided => "voided",
        };
        f.write_str(s)
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            "voided" => Ok(InvoiceStatus::Voided),
            other => Err(format!("Invalid invoice status: '{}'", other)),
        }
    }
}

/// A persisted invoice record
///
/// The monetary fields follow the ledger's balance semantics:
///
/// - `amount` is the **outstanding balance owed**, not the original face
///   value. Payments decrement it directly; it reaches zero exactly when
///   the invoice is settled.
/// - `paid_amount` is the cumulative amount paid so far.
///
/// Both are non-negative at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    /// Store-assigned identifier, immutable after insert
    pub id: InvoiceId,

    /// Outstanding balance owed, decremented by accepted payments
    pub amount: Decimal,

    /// Cumulative amount paid so far
    pub paid_amount: Decimal,

    /// Timestamp after which the invoice becomes eligible for overdue
    /// processing (subject to the sweep's grace period)
    pub due_date: DateTime<Utc>,

    /// Lifecycle status
    pub status: InvoiceStatus,
}

impl Invoice {
    /// Whether the invoice is still open for payments and overdue processing
    pub fn is_pending(&self) -> bool {
        self.status == InvoiceStatus::Pending
    }
}

/// Insert payload for a new invoice, before the store assigns an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub amount: Decimal,
    pub paid_amount: Decimal,
    pub due_date: DateTime<Utc>,
    pub status: InvoiceStatus,
}

impl NewInvoice {
    /// Payload for a freshly issued invoice: nothing paid, status pending
    pub fn pending(amount: Decimal, due_date: DateTime<Utc>) -> Self {
        NewInvoice {
            amount,
            paid_amount: Decimal::ZERO,
            due_date,
            status: InvoiceStatus::Pending,
        }
    }

    /// Attach a store-assigned id, producing the persisted record
    pub fn into_invoice(self, id: InvoiceId) -> Invoice {
        Invoice {
            id,
            amount: self.amount,
            paid_amount: self.paid_amount,
            due_date: self.due_date,
            status: self.status,
        }
    }
}
