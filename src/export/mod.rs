//! CSV export of listing records.
//!
//! Records opt in by implementing [`CsvRecord`]; [`to_csv`] renders a header
//! row followed by one row per record with proper quoting.
//!
//! ```rust
//! use backoffice::export::{CsvRecord, to_csv};
//!
//! struct Line {
//!     name: &'static str,
//!     amount: f64,
//! }
//!
//! impl CsvRecord for Line {
//!     fn headers() -> &'static [&'static str] {
//!         &["Name", "Amount"]
//!     }
//!
//!     fn row(&self) -> Vec<String> {
//!         vec![self.name.to_string(), self.amount.to_string()]
//!     }
//! }
//!
//! let csv = to_csv(&[Line { name: "Patel, Niru", amount: 1410.0 }]).unwrap();
//! assert_eq!(csv, "Name,Amount\n\"Patel, Niru\",1410\n");
//! ```

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};

use crate::Error;

/// Placeholder written for absent optional values.
pub const MISSING: &str = "-";

/// A record that can be exported as one CSV row.
pub trait CsvRecord {
    /// Column headers, in row order.
    fn headers() -> &'static [&'static str];

    /// The record's cells, one per header.
    fn row(&self) -> Vec<String>;
}

/// Renders `records` as CSV, header row first.
///
/// An empty slice yields just the header row.
///
/// # Errors
///
/// Returns [`ErrorKind::Export`](crate::ErrorKind::Export) if a row cannot be
/// written.
pub fn to_csv<T: CsvRecord>(records: &[T]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(T::headers())?;
    for record in records {
        writer.write_record(record.row())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::export(format!("failed to flush CSV: {}", e.error())))?;
    String::from_utf8(bytes).map_err(|e| Error::export(format!("CSV is not UTF-8: {}", e)))
}

/// Writes `records` as CSV to `path`.
///
/// # Errors
///
/// Returns [`ErrorKind::Export`](crate::ErrorKind::Export) on rendering or
/// I/O failure.
pub fn write_csv_file<T: CsvRecord>(path: impl AsRef<Path>, records: &[T]) -> Result<(), Error> {
    let path = path.as_ref();
    let csv = to_csv(records)?;
    std::fs::write(path, csv).map_err(|e| {
        Error::export(format!("failed to write {}: {}", path.display(), e)).with_source(e)
    })?;
    tracing::info!(path = %path.display(), rows = records.len(), "exported CSV");
    Ok(())
}

/// Builds a dated export file name: `<prefix>-YYYY-MM-DD.csv`.
///
/// ```rust
/// use backoffice::export::export_file_name;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 6, 24).unwrap();
/// assert_eq!(export_file_name("bulk-transaction-bt_1", date), "bulk-transaction-bt_1-2025-06-24.csv");
/// ```
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.csv", prefix, date.format("%Y-%m-%d"))
}

/// Formats a timestamp for an export cell.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Returns the value or [`MISSING`].
pub fn or_missing(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => MISSING.to_string(),
    }
}
