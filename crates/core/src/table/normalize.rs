//! Field normalization: raw segmented rows to finalized records.

use chrono::NaiveDate;

use crate::error::{BicError, Result};
use crate::table::{Record, COLUMN_COUNT};
use crate::utils::collapse_whitespace;

/// Columns that must hold a valid calendar date.
const DATE_COLUMNS: [usize; 2] = [0, 1];

/// Normalize one raw row into a finalized record.
///
/// Text fields are trimmed with internal whitespace collapsed; the two
/// date columns are validated as real calendar dates and re-emitted in
/// ISO-8601. Optional columns stay as empty strings when nothing was
/// assigned. A date that does not parse is a data-integrity error for
/// the record.
pub fn normalize_record(raw: Vec<String>) -> Result<Record> {
    if raw.len() != COLUMN_COUNT {
        return Err(BicError::MalformedRecord(format!(
            "row has {} fields, expected {}",
            raw.len(),
            COLUMN_COUNT
        )));
    }

    let mut record: Record = raw.iter().map(|c| collapse_whitespace(c)).collect();
    for col in DATE_COLUMNS {
        record[col] = normalize_date(&record[col])?;
    }
    Ok(record)
}

/// Normalize a page's raw rows, applying the documented integrity
/// policy: a record that fails normalization is skipped with a warning,
/// never silently corrupted and never fatal for the rest of the
/// document.
pub fn normalize_rows(raw_rows: Vec<Vec<String>>, page_index: usize) -> Vec<Record> {
    let mut records = Vec::with_capacity(raw_rows.len());
    for raw in raw_rows {
        match normalize_record(raw) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(page = page_index, %err, "skipping malformed record");
            }
        }
    }
    records
}

/// Validate and reformat a directory date as `YYYY-MM-DD`.
fn normalize_date(s: &str) -> Result<String> {
    let trimmed = s.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| BicError::MalformedRecord(format!("invalid date field: {trimmed:?}")))?;
    Ok(date.format("%Y-%m-%d").to_string())
}
