//! Shared concurrent invoice store
//!
//! `DashMap`-backed [`InvoiceStore`] implementation. Cloning is cheap and
//! shares the underlying state, so each worker in a multi-threaded process
//! can hold its own handle. DashMap's entry-level locking serializes
//! `update_with` per record, which is exactly the guarantee the ledger
//! delegates to the store for concurrent payments against the same invoice.

use crate::core::traits::InvoiceStore;
use crate::types::{Invoice, InvoiceId, NewInvoice, StoreError};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct Inner {
    invoices: DashMap<InvoiceId, Invoice>,
    /// Next id to assign; monotonic, never reset
    next_id: AtomicU32,
}

/// Thread-safe in-memory store; clones share state
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Inner>,
}

impl SharedStore {
    /// Create an empty store
    pub fn new() -> Self {
        SharedStore {
            inner: Arc::new(Inner {
                invoices: DashMap::new(),
                next_id: AtomicU32::new(1),
            }),
        }
    }

    fn assign_id(&self) -> Result<InvoiceId, StoreError> {
        self.inner
            .next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
            .map_err(|_| StoreError::backend("invoice id space exhausted"))
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceStore for SharedStore {
    fn insert(&mut self, record: NewInvoice) -> Result<InvoiceId, StoreError> {
        let id = self.assign_id()?;
        self.inner.invoices.insert(id, record.into_invoice(id));
        Ok(id)
    }

    fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        Ok(self.inner.invoices.get(&id).map(|entry| entry.clone()))
    }

    fn all(&self) -> Result<Vec<Invoice>, StoreError> {
        let mut records: Vec<Invoice> = self
            .inner
            .invoices
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|invoice| invoice.id);
        Ok(records)
    }

    fn update(&mut self, record: Invoice) -> Result<(), StoreError> {
        match self.inner.invoices.get_mut(&record.id) {
            Some(mut existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(StoreError::missing_record(record.id)),
        }
    }

    fn delete(&mut self, id: InvoiceId) -> Result<(), StoreError> {
        self.inner.invoices.remove(&id);
        Ok(())
    }

    fn update_with<T, F>(&mut self, id: InvoiceId, f: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut Invoice) -> T,
    {
        // The entry guard is held across the closure, so concurrent
        // read-modify-writes of the same record serialize here.
        Ok(self
            .inner
            .invoices
            .get_mut(&id)
            .map(|mut entry| f(&mut entry)))
    }

    fn close_and_spawn(
        &mut self,
        closed: Invoice,
        successor: NewInvoice,
    ) -> Result<InvoiceId, StoreError> {
        {
            let mut entry = self
                .inner
                .invoices
                .get_mut(&closed.id)
                .ok_or_else(|| StoreError::missing_record(closed.id))?;
            *entry = closed;
        }
        let id = self.assign_id()?;
        self.inner.invoices.insert(id, successor.into_invoice(id));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InvoiceStatus;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::thread;

    fn pending(amount: i64) -> NewInvoice {
        NewInvoice::pending(
            Decimal::new(amount, 2),
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_clones_share_state() {
        let mut store = SharedStore::new();
        let clone = store.clone();

        let id = store.insert(pending(10000)).unwrap();

        assert_eq!(clone.get(id).unwrap().unwrap().amount, Decimal::new(10000, 2));
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut store = SharedStore::new();

        assert_eq!(store.insert(pending(100)).unwrap(), 1);
        assert_eq!(store.insert(pending(200)).unwrap(), 2);
    }

    #[test]
    fn test_update_missing_record_fails() {
        let mut store = SharedStore::new();

        let err = store.update(pending(100).into_invoice(5)).unwrap_err();
        assert_eq!(err, StoreError::missing_record(5));
    }

    #[test]
    fn test_all_is_sorted_by_id() {
        let mut store = SharedStore::new();
        for amount in [300, 100, 200] {
            store.insert(pending(amount)).unwrap();
        }

        let ids: Vec<_> = store.all().unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_close_and_spawn_persists_both_records() {
        let mut store = SharedStore::new();
        let id = store.insert(pending(10000)).unwrap();

        let mut closed = store.get(id).unwrap().unwrap();
        closed.status = InvoiceStatus::Paid;
        let successor_id = store.close_and_spawn(closed, pending(11000)).unwrap();

        assert_eq!(store.get(id).unwrap().unwrap().status, InvoiceStatus::Paid);
        assert_eq!(
            store.get(successor_id).unwrap().unwrap().status,
            InvoiceStatus::Pending
        );
    }

    #[test]
    fn test_concurrent_updates_against_different_records() {
        let mut store = SharedStore::new();
        let first = store.insert(pending(10000)).unwrap();
        let second = store.insert(pending(20000)).unwrap();

        let handles: Vec<_> = [first, second]
            .into_iter()
            .map(|id| {
                let mut handle = store.clone();
                thread::spawn(move || {
                    handle
                        .update_with(id, |invoice| {
                            invoice.paid_amount = Decimal::new(100, 2);
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            store.get(first).unwrap().unwrap().paid_amount,
            Decimal::new(100, 2)
        );
        assert_eq!(
            store.get(second).unwrap().unwrap().paid_amount,
            Decimal::new(100, 2)
        );
    }

    #[test]
    fn test_concurrent_payments_against_same_record_serialize() {
        let mut store = SharedStore::new();
        let id = store.insert(pending(10000)).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mut handle = store.clone();
                thread::spawn(move || {
                    handle
                        .update_with(id, |invoice| {
                            invoice.amount -= Decimal::new(1000, 2);
                            invoice.paid_amount += Decimal::new(1000, 2);
                        })
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let invoice = store.get(id).unwrap().unwrap();
        assert_eq!(invoice.amount, Decimal::new(6000, 2));
        assert_eq!(invoice.paid_amount, Decimal::new(4000, 2));
    }
}
