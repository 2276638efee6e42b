//! I/O module
//!
//! CSV transport for the ledger:
//! - `csv_format` - row parsing/validation and invoice report serialization
//! - `reader` - streaming iterator over command rows

pub mod csv_format;
pub mod reader;

pub use csv_format::{convert_csv_record, write_invoices_csv, CsvRecord};
pub use reader::CommandReader;
