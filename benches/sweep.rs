//! Benchmark suite for the overdue sweep
//!
//! Measures `process_overdue` against ledgers of varying size using the divan
//! benchmarking framework. Half of the seeded invoices carry a partial
//! payment, so both sweep branches (settle vs. void) are exercised.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use chrono::{Duration, TimeZone, Utc};
use invoice_ledger::core::{FixedClock, InvoiceLedger, MemoryStore, SharedStore};
use invoice_ledger::types::Command;
use rust_decimal::Decimal;

fn main() {
    divan::main();
}

fn seed_commands(count: u32) -> Vec<Command> {
    let origin = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    let mut commands = Vec::with_capacity(count as usize * 2);
    for i in 0..count {
        commands.push(Command::Create {
            amount: Decimal::new(10_000 + i as i64, 2),
            due_date: origin + Duration::days((i % 30) as i64),
        });
        if i % 2 == 0 {
            commands.push(Command::Pay {
                id: i + 1,
                amount: Decimal::new(2_500, 2),
            });
        }
    }
    commands
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn sweep_memory_store(bencher: divan::Bencher, count: u32) {
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    let commands = seed_commands(count);

    bencher
        .with_inputs(|| {
            let mut ledger = InvoiceLedger::new(MemoryStore::new(), FixedClock::new(now));
            for command in &commands {
                ledger.apply(command.clone()).expect("seeding failed");
            }
            ledger
        })
        .bench_values(|mut ledger| {
            ledger
                .process_overdue(Decimal::new(1_500, 2), 10)
                .expect("sweep failed");
        });
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn sweep_shared_store(bencher: divan::Bencher, count: u32) {
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    let commands = seed_commands(count);

    bencher
        .with_inputs(|| {
            let mut ledger = InvoiceLedger::new(SharedStore::new(), FixedClock::new(now));
            for command in &commands {
                ledger.apply(command.clone()).expect("seeding failed");
            }
            ledger
        })
        .bench_values(|mut ledger| {
            ledger
                .process_overdue(Decimal::new(1_500, 2), 10)
                .expect("sweep failed");
        });
}
