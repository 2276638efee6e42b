//! Streaming CSV command reader
//!
//! Provides an iterator over ledger commands parsed from a CSV file,
//! delegating format concerns to the `csv_format` module. Records are read
//! one at a time; memory usage does not grow with the file.
//!
//! Fatal errors (file not found) are returned from `new()`. Individual row
//! failures are yielded as `Err` items carrying the line number, so the
//! caller can log them and keep processing.

use crate::io::csv_format::{convert_csv_record, CsvRecord};
use crate::types::Command;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming reader over command rows
#[derive(Debug)]
pub struct CommandReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl CommandReader {
    /// Open a command CSV for streaming iteration
    ///
    /// The reader trims whitespace and accepts rows with trailing fields
    /// omitted, since most operations only use a subset of the columns.
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for CommandReader {
    type Item = Result<Command, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvRecord>();

        match deserializer.next()? {
            Ok(csv_record) => {
                self.line_num += 1;
                // Line numbers are 1-based and the header occupies line 1.
                Some(
                    convert_csv_record(csv_record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}
