//! Ledger command types
//!
//! A [`Command`] is one fully validated instruction for the ledger, produced
//! by the transport layer from a raw input row. Each variant maps to exactly
//! one ledger operation.

use super::invoice::{Invoice, InvoiceId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A single validated ledger instruction
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Issue a new invoice with the given outstanding balance and due date
    Create {
        amount: Decimal,
        due_date: DateTime<Utc>,
    },

    /// Apply a payment against the invoice's outstanding balance
    Pay { id: InvoiceId, amount: Decimal },

    /// Run an overdue sweep: close out invoices past their grace period and
    /// spawn penalized successors
    Sweep {
        late_fee: Decimal,
        overdue_days: i64,
    },

    /// Administrative full-record replacement keyed by the invoice id
    Update { invoice: Invoice },

    /// Remove an invoice unconditionally
    Delete { id: InvoiceId },
}

impl Command {
    /// Operation name for diagnostics
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::Create { .. } => "create",
            Command::Pay { .. } => "pay",
            Command::Sweep { .. } => "sweep",
            Command::Update { .. } => "update",
            Command::Delete { .. } => "delete",
        }
    }
}
