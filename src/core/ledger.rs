//! Invoice lifecycle engine
//!
//! This module provides the [`InvoiceLedger`], which applies lifecycle
//! operations to invoice records obtained from the persistence store and
//! enforces the state machine rules:
//!
//! - `Pending` is the only live state; `Paid` and `Voided` are terminal
//! - `amount` is the outstanding balance owed, decremented by payments
//! - a payment exceeding the outstanding balance is a logged no-op, not an
//!   error
//! - the overdue sweep closes out pending invoices past their grace period
//!   and spawns a penalized successor for each
//!
//! The ledger holds no cross-call state of its own; the injected store is
//! the sole shared mutable resource and the injected clock is the sole time
//! source.

use crate::core::traits::{Clock, InvoiceStore};
use crate::types::{Command, Invoice, InvoiceId, InvoiceStatus, LedgerError, NewInvoice};
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Outcome of a payment's read-modify-write, decided under the store's
/// per-record serialization
enum PayOutcome {
    /// Balance reduced, invoice still pending
    Applied,
    /// Balance reached exactly zero, invoice settled
    Settled,
    /// Payment exceeded the outstanding balance; record untouched
    RejectedOverpayment { outstanding: Decimal },
    /// Invoice already in a terminal state; record untouched
    AlreadyClosed { status: InvoiceStatus },
    /// Cumulative paid amount would overflow; record untouched
    Overflow,
}

/// Invoice lifecycle engine
///
/// Coordinates between the injected [`InvoiceStore`] and [`Clock`] to apply
/// create, pay, overdue-sweep, update, and delete operations while
/// maintaining the lifecycle invariants.
pub struct InvoiceLedger<S, C> {
    store: S,
    clock: C,
}

impl<S: InvoiceStore, C: Clock> InvoiceLedger<S, C> {
    /// Create a ledger over the given store and clock
    pub fn new(store: S, clock: C) -> Self {
        InvoiceLedger { store, clock }
    }

    /// Apply a single validated command
    ///
    /// Routes the command to the corresponding lifecycle operation. The
    /// record returned by a create is dropped here; transports that need it
    /// call [`InvoiceLedger::create_invoice`] directly.
    pub fn apply(&mut self, command: Command) -> Result<(), LedgerError> {
        match command {
            Command::Create { amount, due_date } => {
                self.create_invoice(amount, due_date).map(|_| ())
            }
            Command::Pay { id, amount } => self.pay_invoice(id, amount),
            Command::Sweep {
                late_fee,
                overdue_days,
            } => self.process_overdue(late_fee, overdue_days),
            Command::Update { invoice } => self.update_invoice(invoice),
            Command::Delete { id } => self.delete_invoice(id),
        }
    }

    /// Issue a new invoice
    ///
    /// The record is persisted with the full amount outstanding, nothing
    /// paid, and status `Pending`; the store assigns the id.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NegativeAmount`] for a negative amount
    /// - [`LedgerError::Store`] when the insert fails
    pub fn create_invoice(
        &mut self,
        amount: Decimal,
        due_date: DateTime<Utc>,
    ) -> Result<Invoice, LedgerError> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::negative_amount("create_invoice", amount));
        }

        let record = NewInvoice::pending(amount, due_date);
        let id = self
            .store
            .insert(record.clone())
            .map_err(|e| LedgerError::store("create_invoice", None, e))?;

        info!(id, amount = %amount, due_date = %due_date, "invoice issued");
        Ok(record.into_invoice(id))
    }

    /// Apply a payment against an invoice's outstanding balance
    ///
    /// On acceptance the outstanding `amount` shrinks by the payment and
    /// `paid_amount` grows by it; reaching exactly zero settles the invoice
    /// (`status -> Paid`). Two cases are deliberate no-ops rather than
    /// errors: a payment exceeding the outstanding balance (overpayment is
    /// disallowed at the point of payment), and a payment against an invoice
    /// already in a terminal state. Paying off the exact balance twice is
    /// therefore not idempotent: the second payment exceeds the
    /// now-zero balance and is rejected.
    ///
    /// The read-modify-write runs under the store's per-record
    /// serialization, so concurrent payments against the same invoice cannot
    /// interleave.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NegativeAmount`] for a negative payment
    /// - [`LedgerError::InvoiceNotFound`] when the id does not exist
    /// - [`LedgerError::Store`] when the store fails
    pub fn pay_invoice(&mut self, id: InvoiceId, amount: Decimal) -> Result<(), LedgerError> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::negative_amount("pay_invoice", amount));
        }

        let outcome = self
            .store
            .update_with(id, |invoice| {
                if invoice.status.is_terminal() {
                    return PayOutcome::AlreadyClosed {
                        status: invoice.status,
                    };
                }
                if amount > invoice.amount {
                    return PayOutcome::RejectedOverpayment {
                        outstanding: invoice.amount,
                    };
                }

                let new_paid = match invoice.paid_amount.checked_add(amount) {
                    Some(total) => total,
                    None => return PayOutcome::Overflow,
                };
                invoice.amount -= amount;
                invoice.paid_amount = new_paid;

                if invoice.amount == Decimal::ZERO {
                    invoice.status = InvoiceStatus::Paid;
                    PayOutcome::Settled
                } else {
                    PayOutcome::Applied
                }
            })
            .map_err(|e| LedgerError::store("pay_invoice", Some(id), e))?
            .ok_or_else(|| LedgerError::not_found(id, "pay_invoice"))?;

        match outcome {
            PayOutcome::Applied => {
                info!(id, amount = %amount, "payment applied");
                Ok(())
            }
            PayOutcome::Settled => {
                info!(id, amount = %amount, "payment applied, invoice settled");
                Ok(())
            }
            PayOutcome::RejectedOverpayment { outstanding } => {
                warn!(
                    id,
                    amount = %amount,
                    outstanding = %outstanding,
                    "payment exceeds outstanding balance, ignoring"
                );
                Ok(())
            }
            PayOutcome::AlreadyClosed { status } => {
                debug!(id, %status, "payment against closed invoice, ignoring");
                Ok(())
            }
            PayOutcome::Overflow => Err(LedgerError::arithmetic_overflow("pay_invoice", id)),
        }
    }

    /// Run an overdue sweep
    ///
    /// Takes a snapshot of all invoices and selects those still `Pending`
    /// whose `due_date + overdue_days` lies strictly before the clock's
    /// current time. Each selected invoice is closed out - `Paid` when any
    /// payment was received, `Voided` when none was - and replaced by one
    /// derived invoice carrying the outstanding balance plus the late fee,
    /// due `overdue_days` from now. Close and spawn land as a single store
    /// call per invoice.
    ///
    /// Invoices are processed independently in id order; the first store
    /// failure aborts the remaining sweep and surfaces as this operation's
    /// error. Already-applied transitions are not rolled back. An empty
    /// overdue set is a no-op.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NegativeAmount`] for a negative late fee
    /// - [`LedgerError::InvalidOverdueDays`] for a negative or
    ///   out-of-range grace period
    /// - [`LedgerError::Store`] when a per-invoice store call fails
    pub fn process_overdue(
        &mut self,
        late_fee: Decimal,
        overdue_days: i64,
    ) -> Result<(), LedgerError> {
        if late_fee < Decimal::ZERO {
            return Err(LedgerError::negative_amount("process_overdue", late_fee));
        }
        let grace = match Duration::try_days(overdue_days) {
            Some(grace) if overdue_days >= 0 => grace,
            _ => return Err(LedgerError::InvalidOverdueDays { days: overdue_days }),
        };

        let now = self.clock.now();
        let successor_due = now
            .checked_add_signed(grace)
            .ok_or(LedgerError::InvalidOverdueDays { days: overdue_days })?;

        // Snapshot first: successors created below must never be re-selected
        // within the same sweep.
        let snapshot = self
            .store
            .all()
            .map_err(|e| LedgerError::store("process_overdue", None, e))?;
        let overdue: Vec<Invoice> = snapshot
            .into_iter()
            .filter(|invoice| {
                invoice.is_pending()
                    && invoice
                        .due_date
                        .checked_add_signed(grace)
                        .is_some_and(|deadline| deadline < now)
            })
            .collect();

        if overdue.is_empty() {
            debug!("overdue sweep found no eligible invoices");
            return Ok(());
        }

        for mut invoice in overdue {
            let id = invoice.id;
            let had_payment = invoice.paid_amount > Decimal::ZERO;

            // `amount` is already the remaining balance, so both branches
            // carry it forward unchanged plus the penalty.
            let successor_amount = invoice
                .amount
                .checked_add(late_fee)
                .ok_or_else(|| LedgerError::arithmetic_overflow("process_overdue", id))?;

            invoice.status = if had_payment {
                InvoiceStatus::Paid
            } else {
                InvoiceStatus::Voided
            };
            let closed_status = invoice.status;

            let successor_id = self
                .store
                .close_and_spawn(invoice, NewInvoice::pending(successor_amount, successor_due))
                .map_err(|e| LedgerError::store("process_overdue", Some(id), e))?;

            info!(
                id,
                %closed_status,
                successor_id,
                successor_amount = %successor_amount,
                "overdue invoice closed, successor issued"
            );
        }

        Ok(())
    }

    /// Administrative full-record replacement keyed by the invoice's id
    ///
    /// Unlike [`InvoiceLedger::pay_invoice`], an absent id is a *soft*
    /// failure: it is logged and the call returns `Ok(())` with no effect.
    /// Replacements arrive from administrative batch feeds where an absent
    /// id usually means the invoice was deleted in the meantime, so callers
    /// that need a hard signal should fetch the record first.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NegativeAmount`] when either monetary field is
    ///   negative
    /// - [`LedgerError::Store`] for store failures other than a missing
    ///   record
    pub fn update_invoice(&mut self, invoice: Invoice) -> Result<(), LedgerError> {
        if invoice.amount < Decimal::ZERO {
            return Err(LedgerError::negative_amount("update_invoice", invoice.amount));
        }
        if invoice.paid_amount < Decimal::ZERO {
            return Err(LedgerError::negative_amount(
                "update_invoice",
                invoice.paid_amount,
            ));
        }

        let id = invoice.id;
        match self.store.update(invoice) {
            Ok(()) => {
                info!(id, "invoice replaced");
                Ok(())
            }
            Err(crate::types::StoreError::MissingRecord { .. }) => {
                warn!(id, "update of absent invoice, ignoring");
                Ok(())
            }
            Err(e) => Err(LedgerError::store("update_invoice", Some(id), e)),
        }
    }

    /// Remove an invoice unconditionally, regardless of status
    ///
    /// A no-op when the id does not exist.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Store`] when the store fails
    pub fn delete_invoice(&mut self, id: InvoiceId) -> Result<(), LedgerError> {
        self.store
            .delete(id)
            .map_err(|e| LedgerError::store("delete_invoice", Some(id), e))?;
        info!(id, "invoice deleted");
        Ok(())
    }

    /// Fetch a single invoice
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvoiceNotFound`] when the id does not exist
    /// - [`LedgerError::Store`] when the store fails
    pub fn get_invoice(&self, id: InvoiceId) -> Result<Invoice, LedgerError> {
        self.store
            .get(id)
            .map_err(|e| LedgerError::store("get_invoice", Some(id), e))?
            .ok_or_else(|| LedgerError::not_found(id, "get_invoice"))
    }

    /// Fetch all invoices, sorted by id
    ///
    /// # Errors
    ///
    /// - [`LedgerError::Store`] when the store fails
    pub fn list_invoices(&self) -> Result<Vec<Invoice>, LedgerError> {
        self.store
            .all()
            .map_err(|e| LedgerError::store("list_invoices", None, e))
    }
}
