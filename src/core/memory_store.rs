//! In-memory invoice store
//!
//! `HashMap`-backed [`InvoiceStore`] implementation used by the synchronous
//! pipeline and by unit tests. Ids come from a monotonic counter starting at
//! 1; deleted ids are never handed out again.

use crate::core::traits::InvoiceStore;
use crate::types::{Invoice, InvoiceId, NewInvoice, StoreError};
use std::collections::HashMap;

/// Single-threaded in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Map of invoice id to record
    invoices: HashMap<InvoiceId, Invoice>,
    /// Next id to assign; monotonic, never reset
    next_id: InvoiceId,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemoryStore {
            invoices: HashMap::new(),
            next_id: 1,
        }
    }

    fn assign_id(&mut self) -> Result<InvoiceId, StoreError> {
        let id = self.next_id;
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| StoreError::backend("invoice id space exhausted"))?;
        Ok(id)
    }
}

impl InvoiceStore for MemoryStore {
    fn insert(&mut self, record: NewInvoice) -> Result<InvoiceId, StoreError> {
        let id = self.assign_id()?;
        self.invoices.insert(id, record.into_invoice(id));
        Ok(id)
    }

    fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        Ok(self.invoices.get(&id).cloned())
    }

    fn all(&self) -> Result<Vec<Invoice>, StoreError> {
        let mut records: Vec<Invoice> = self.invoices.values().cloned().collect();
        records.sort_by_key(|invoice| invoice.id);
        Ok(records)
    }

    fn update(&mut self, record: Invoice) -> Result<(), StoreError> {
        match self.invoices.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(StoreError::missing_record(record.id)),
        }
    }

    fn delete(&mut self, id: InvoiceId) -> Result<(), StoreError> {
        self.invoices.remove(&id);
        Ok(())
    }

    fn update_with<T, F>(&mut self, id: InvoiceId, f: F) -> Result<Option<T>, StoreError>
    where
        F: FnOnce(&mut Invoice) -> T,
    {
        Ok(self.invoices.get_mut(&id).map(f))
    }

    fn close_and_spawn(
        &mut self,
        closed: Invoice,
        successor: NewInvoice,
    ) -> Result<InvoiceId, StoreError> {
        if !self.invoices.contains_key(&closed.id) {
            return Err(StoreError::missing_record(closed.id));
        }
        let id = self.assign_id()?;
        self.invoices.insert(closed.id, closed);
        self.invoices.insert(id, successor.into_invoice(id));
        Ok(id)
    }
}
