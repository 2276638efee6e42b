//! CSV format handling for ledger commands and the invoice report
//!
//! This module centralizes all CSV format concerns:
//! - `CsvRecord` structure for deserialization of raw command rows
//! - Conversion from raw rows to validated [`Command`] values
//! - Invoice report serialization
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Input format
//!
//! ```csv
//! op,id,amount,due_date,paid_amount,status,late_fee,overdue_days
//! create,,100.00,2026-10-01T00:00:00+00:00,,,,
//! pay,1,60.00,,,,,
//! sweep,,,,,,10.00,30
//! update,1,40.00,2026-11-01T00:00:00+00:00,60.00,pending,,
//! delete,1,,,,,,
//! ```
//!
//! Only the fields an operation needs are required; the rest may be empty or
//! omitted entirely (the reader is configured flexible).

use crate::types::{Command, Invoice, InvoiceId, InvoiceStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// Raw CSV row, deserialized before validation
///
/// Every field except `op` is optional at this stage; presence requirements
/// depend on the operation and are enforced by [`convert_csv_record`].
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRecord {
    pub op: String,
    pub id: Option<String>,
    pub amount: Option<String>,
    pub due_date: Option<String>,
    pub paid_amount: Option<String>,
    pub status: Option<String>,
    pub late_fee: Option<String>,
    pub overdue_days: Option<String>,
}

fn field<'a>(value: &'a Option<String>, name: &str, op: &str) -> Result<&'a str, String> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.trim()),
        _ => Err(format!("Missing field '{}' for {} op", name, op)),
    }
}

fn parse_id(value: &Option<String>, op: &str) -> Result<InvoiceId, String> {
    let raw = field(value, "id", op)?;
    raw.parse::<InvoiceId>()
        .map_err(|_| format!("Invalid invoice id '{}'", raw))
}

fn parse_decimal(value: &Option<String>, name: &str, op: &str) -> Result<Decimal, String> {
    let raw = field(value, name, op)?;
    Decimal::from_str(raw).map_err(|_| format!("Invalid {} '{}'", name, raw))
}

fn parse_date(value: &Option<String>, op: &str) -> Result<DateTime<Utc>, String> {
    let raw = field(value, "due_date", op)?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("Invalid due_date '{}' (expected RFC 3339)", raw))
}

/// Convert a raw CSV row into a validated [`Command`]
///
/// Checks the operation name and the presence and syntax of the fields that
/// operation requires. Business rules (negative amounts, unknown ids) are
/// the ledger's concern, not this function's.
pub fn convert_csv_record(record: CsvRecord) -> Result<Command, String> {
    let op = record.op.trim().to_lowercase();
    match op.as_str() {
        "create" => Ok(Command::Create {
            amount: parse_decimal(&record.amount, "amount", "create")?,
            due_date: parse_date(&record.due_date, "create")?,
        }),
        "pay" => Ok(Command::Pay {
            id: parse_id(&record.id, "pay")?,
            amount: parse_decimal(&record.amount, "amount", "pay")?,
        }),
        "sweep" => {
            let raw_days = field(&record.overdue_days, "overdue_days", "sweep")?;
            let overdue_days = raw_days
                .parse::<i64>()
                .map_err(|_| format!("Invalid overdue_days '{}'", raw_days))?;
            Ok(Command::Sweep {
                late_fee: parse_decimal(&record.late_fee, "late_fee", "sweep")?,
                overdue_days,
            })
        }
        "update" => {
            let raw_status = field(&record.status, "status", "update")?;
            let status = InvoiceStatus::from_str(raw_status)?;
            Ok(Command::Update {
                invoice: Invoice {
                    id: parse_id(&record.id, "update")?,
                    amount: parse_decimal(&record.amount, "amount", "update")?,
                    paid_amount: parse_decimal(&record.paid_amount, "paid_amount", "update")?,
                    due_date: parse_date(&record.due_date, "update")?,
                    status,
                },
            })
        }
        "delete" => Ok(Command::Delete {
            id: parse_id(&record.id, "delete")?,
        }),
        other => Err(format!("Invalid op '{}'", other)),
    }
}

/// Write the invoice report as CSV
///
/// Columns: `id,amount,paid_amount,due_date,status`. Records are sorted by
/// id, amounts are rendered with two decimal places, and due dates as
/// RFC 3339, so the output is deterministic and diffable.
pub fn write_invoices_csv(invoices: &[Invoice], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "amount", "paid_amount", "due_date", "status"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted = invoices.to_vec();
    sorted.sort_by_key(|invoice| invoice.id);

    for invoice in sorted {
        writer
            .write_record(&[
                invoice.id.to_string(),
                format!("{:.2}", invoice.amount),
                format!("{:.2}", invoice.paid_amount),
                invoice.due_date.to_rfc3339(),
                invoice.status.to_string(),
            ])
            .map_err(|e| format!("Failed to write invoice record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn record(op: &str) -> CsvRecord {
        CsvRecord {
            op: op.to_string(),
            ..CsvRecord::default()
        }
    }

    #[test]
    fn test_convert_create() {
        let mut rec = record("create");
        rec.amount = Some("100.00".to_string());
        rec.due_date = Some("2026-10-01T00:00:00+00:00".to_string());

        let cmd = convert_csv_record(rec).unwrap();
        assert_eq!(
            cmd,
            Command::Create {
                amount: Decimal::new(10000, 2),
                due_date: Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap(),
            }
        );
    }

    #[test]
    fn test_convert_pay() {
        let mut rec = record("pay");
        rec.id = Some("3".to_string());
        rec.amount = Some("60".to_string());

        let cmd = convert_csv_record(rec).unwrap();
        assert_eq!(
            cmd,
            Command::Pay {
                id: 3,
                amount: Decimal::new(60, 0),
            }
        );
    }

    #[test]
    fn test_convert_sweep() {
        let mut rec = record("sweep");
        rec.late_fee = Some("10.00".to_string());
        rec.overdue_days = Some("30".to_string());

        let cmd = convert_csv_record(rec).unwrap();
        assert_eq!(
            cmd,
            Command::Sweep {
                late_fee: Decimal::new(1000, 2),
                overdue_days: 30,
            }
        );
    }

    #[test]
    fn test_convert_update() {
        let mut rec = record("update");
        rec.id = Some("2".to_string());
        rec.amount = Some("40.00".to_string());
        rec.paid_amount = Some("60.00".to_string());
        rec.due_date = Some("2026-11-01T00:00:00+00:00".to_string());
        rec.status = Some("pending".to_string());

        let cmd = convert_csv_record(rec).unwrap();
        match cmd {
            Command::Update { invoice } => {
                assert_eq!(invoice.id, 2);
                assert_eq!(invoice.amount, Decimal::new(4000, 2));
                assert_eq!(invoice.paid_amount, Decimal::new(6000, 2));
                assert_eq!(invoice.status, InvoiceStatus::Pending);
            }
            other => panic!("Expected update command, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_delete() {
        let mut rec = record("delete");
        rec.id = Some("7".to_string());

        assert_eq!(convert_csv_record(rec).unwrap(), Command::Delete { id: 7 });
    }

    #[test]
    fn test_convert_op_is_case_insensitive() {
        let mut rec = record("DeLeTe");
        rec.id = Some("7".to_string());

        assert_eq!(convert_csv_record(rec).unwrap(), Command::Delete { id: 7 });
    }

    #[rstest]
    #[case::unknown_op(record("transfer"), "Invalid op 'transfer'")]
    #[case::create_missing_amount(
        {
            let mut r = record("create");
            r.due_date = Some("2026-10-01T00:00:00+00:00".to_string());
            r
        },
        "Missing field 'amount' for create op"
    )]
    #[case::pay_missing_id(
        {
            let mut r = record("pay");
            r.amount = Some("10".to_string());
            r
        },
        "Missing field 'id' for pay op"
    )]
    #[case::sweep_missing_days(
        {
            let mut r = record("sweep");
            r.late_fee = Some("10".to_string());
            r
        },
        "Missing field 'overdue_days' for sweep op"
    )]
    fn test_convert_missing_or_invalid_fields(#[case] rec: CsvRecord, #[case] expected: &str) {
        assert_eq!(convert_csv_record(rec).unwrap_err(), expected);
    }

    #[rstest]
    #[case::bad_amount("pay", |r: &mut CsvRecord| {
        r.id = Some("1".to_string());
        r.amount = Some("abc".to_string());
    }, "Invalid amount 'abc'")]
    #[case::bad_id("delete", |r: &mut CsvRecord| {
        r.id = Some("-1".to_string());
    }, "Invalid invoice id '-1'")]
    #[case::bad_date("create", |r: &mut CsvRecord| {
        r.amount = Some("10".to_string());
        r.due_date = Some("tomorrow".to_string());
    }, "Invalid due_date 'tomorrow' (expected RFC 3339)")]
    #[case::bad_status("update", |r: &mut CsvRecord| {
        r.id = Some("1".to_string());
        r.amount = Some("10".to_string());
        r.paid_amount = Some("0".to_string());
        r.due_date = Some("2026-10-01T00:00:00+00:00".to_string());
        r.status = Some("open".to_string());
    }, "Invalid invoice status: 'open'")]
    fn test_convert_syntax_errors(
        #[case] op: &str,
        #[case] prepare: fn(&mut CsvRecord),
        #[case] expected: &str,
    ) {
        let mut rec = record(op);
        prepare(&mut rec);
        assert_eq!(convert_csv_record(rec).unwrap_err(), expected);
    }

    #[test]
    fn test_write_invoices_csv_sorts_and_formats() {
        let due = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
        let invoices = vec![
            Invoice {
                id: 2,
                amount: Decimal::ZERO,
                paid_amount: Decimal::new(10000, 2),
                due_date: due,
                status: InvoiceStatus::Paid,
            },
            Invoice {
                id: 1,
                amount: Decimal::new(4000, 2),
                paid_amount: Decimal::new(6000, 2),
                due_date: due,
                status: InvoiceStatus::Pending,
            },
        ];

        let mut output = Vec::new();
        write_invoices_csv(&invoices, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "id,amount,paid_amount,due_date,status\n\
             1,40.00,60.00,2026-10-01T00:00:00+00:00,pending\n\
             2,0.00,100.00,2026-10-01T00:00:00+00:00,paid\n"
        );
    }

    #[test]
    fn test_write_invoices_csv_empty_ledger_writes_header_only() {
        let mut output = Vec::new();
        write_invoices_csv(&[], &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "id,amount,paid_amount,due_date,status\n"
        );
    }
}
