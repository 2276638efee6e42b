//! Core traits for the persistence store and clock collaborators
//!
//! The ledger owns no cross-call state of its own; the store is the sole
//! shared mutable resource and the clock is the sole time source. Both are
//! injected behind these traits so the lifecycle rules can be tested against
//! deterministic implementations and so store implementations can choose
//! their own serialization strategy.

use crate::types::{Invoice, InvoiceId, NewInvoice, StoreError};
use chrono::{DateTime, Utc};

/// Persistence store contract consumed by the ledger
///
/// Every call is transactionally consistent on its own. Concurrent payments
/// against the same invoice race unless the implementation serializes
/// `update_with` per record; the ledger deliberately delegates that
/// serialization here rather than assuming in-process mutual exclusion,
/// since the service may run as a horizontally replicated stateless process.
pub trait InvoiceStore {
    /// Insert a new record and return its assigned id
    ///
    /// Ids are assigned by the store, increase monotonically, and are never
    /// reused, including after deletes.
    fn insert(&mut self, record: NewInvoice) -> Result<InvoiceId, StoreError>;

    /// Fetch a record by id, `None` when absent
    fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError>;

    /// Fetch all records, sorted by id for deterministic iteration
    fn all(&self) -> Result<Vec<Invoice>, StoreError>;

    /// Replace a record keyed by its id
    ///
    /// Fails with [`StoreError::MissingRecord`] when no record with that id
    /// exists.
    fn update(&mut self, record: Invoice) -> Result<(), StoreError>;

    /// Remove a record by id; succeeds silently when absent
    fn delete(&mut self, id: InvoiceId) -> Result<(), StoreError>;

    /// Atomically read-modify-write one record
    ///
    /// Runs the closure against the stored record under whatever per-record
    /// serialization the implementation provides and persists the result.
    /// Returns the closure's value, or `None` when the id is absent (the
    /// closure is not run in that case).
    fn update_with<T, F>(&mut self, id: InvoiceId, f: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut Invoice) -> T;

    /// Persist a closed-out record and insert its successor as one unit
    ///
    /// This is the overdue sweep's per-invoice transactional unit: the
    /// original's terminal status and the derived invoice either both land
    /// or the call fails, so a crash mid-sweep leaves at most one invoice
    /// inconsistent instead of corrupting the batch. Returns the successor's
    /// assigned id. Fails with [`StoreError::MissingRecord`] when the
    /// original no longer exists.
    fn close_and_spawn(
        &mut self,
        closed: Invoice,
        successor: NewInvoice,
    ) -> Result<InvoiceId, StoreError>;
}

/// Time source for overdue computation
///
/// Injected so the sweep's "today" is deterministic in tests and can be
/// pinned from the command line.
pub trait Clock {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}
