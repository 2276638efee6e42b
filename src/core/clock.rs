//! Clock implementations
//!
//! `SystemClock` for production, `FixedClock` for deterministic overdue
//! computation in tests and fixture runs.

use crate::core::traits::Clock;
use chrono::{DateTime, Utc};

/// Wall-clock time source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
///
/// Every call to `now` returns the same timestamp, making overdue selection
/// reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Create a clock pinned to the given instant
    pub fn new(instant: DateTime<Utc>) -> Self {
        FixedClock { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}
