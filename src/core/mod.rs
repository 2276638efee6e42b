//! Core business logic module
//!
//! This module contains the invoice lifecycle components:
//! - `traits` - store and clock abstractions the ledger is generic over
//! - `ledger` - the lifecycle state machine
//! - `memory_store` - HashMap-backed store for single-threaded use
//! - `shared_store` - DashMap-backed store safe to share across threads
//! - `clock` - system and fixed clock implementations

pub mod clock;
pub mod ledger;
pub mod memory_store;
pub mod shared_store;
pub mod traits;

pub use clock::{FixedClock, SystemClock};
pub use ledger::InvoiceLedger;
pub use memory_store::MemoryStore;
pub use shared_store::SharedStore;
pub use traits::{Clock, InvoiceStore};
