//! Record assembly: from segmented visual rows to logical directory
//! records.
//!
//! A directory record occupies one to four visual rows: only the first
//! carries the creation date, and wrapped address/name content continues
//! on the following rows. Record boundaries are therefore detected by a
//! date in the first column; rows without one merge into the open
//! record. The column headers the PDF repeats on every page are
//! recognized by their characteristic text and dropped.

pub mod normalize;

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{BicError, Result};
use crate::layout::columns::ColumnTemplate;
use crate::layout::params::ColumnParams;
use crate::layout::rows::RowBand;

/// An extracted directory record: exactly [`COLUMN_COUNT`] strings in
/// fixed column order.
pub type Record = Vec<String>;

/// Number of columns in the directory schema.
pub const COLUMN_COUNT: usize = 10;

/// CSV column headers, identical across all directory editions.
pub const HEADERS: [&str; COLUMN_COUNT] = [
    "Record creation date",
    "Last Update date",
    "BIC",
    "Brch Code",
    "Full legal name",
    "Registered address",
    "Operational address",
    "Branch description",
    "Branch address",
    "Instit. Type",
];

/// Records start with a full `YYYY-MM-DD` date in the first column.
static RECORD_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("record start pattern"));

/// Phrases only found in the repeated per-page header block or the page
/// banner, never in record data.
const HEADER_MARKERS: &[&str] = &[
    "record creation",
    "last update",
    "brch code",
    "bic brch",
    "full legal name",
    "instit. type",
    "inst. type",
    "iso bic directory",
    "registration authority",
    "iso 9362",
];

/// True for the repeated column-header rows and page banners.
pub fn is_header_row(cells: &[String]) -> bool {
    let combined = cells.iter().map(|c| c.to_lowercase()).join(" ");
    HEADER_MARKERS.iter().any(|m| combined.contains(m))
}

/// True when a segmented row begins a new record.
pub fn is_record_start(cells: &[String]) -> bool {
    cells
        .first()
        .is_some_and(|c| RECORD_START.is_match(c.trim()))
}

/// Merge a continuation row into the open record, column by column,
/// separating wrapped parts with a space.
pub fn merge_continuation(record: &mut [String], continuation: &[String]) {
    for (slot, cell) in record.iter_mut().zip(continuation) {
        if cell.is_empty() {
            continue;
        }
        if !slot.is_empty() {
            slot.push(' ');
        }
        slot.push_str(cell);
    }
}

/// Reduce one page's row bands to raw (unnormalized) records.
///
/// Empty rows and header rows are dropped; continuation rows with no
/// open record (stray furniture above the first data row) are ignored.
pub fn assemble_rows(
    bands: &[RowBand],
    template: &ColumnTemplate,
    params: &ColumnParams,
) -> Vec<Vec<String>> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut current: Option<Vec<String>> = None;

    for band in bands {
        let cells = template.segment(band, params);

        if cells.iter().all(|c| c.is_empty()) {
            continue;
        }
        if is_header_row(&cells) {
            continue;
        }

        if is_record_start(&cells) {
            if let Some(record) = current.take() {
                records.push(record);
            }
            current = Some(cells);
        } else if let Some(record) = current.as_mut() {
            merge_continuation(record, &cells);
        }
    }

    if let Some(record) = current.take() {
        records.push(record);
    }

    records
}

/// Enforce the fixed-arity invariant over the assembled document.
///
/// Segmentation produces the template's slot count structurally, so a
/// violation means the pipeline itself is broken; it aborts the whole
/// extraction rather than emitting a partially-valid table.
pub fn validate_arity(records: &[Record]) -> Result<()> {
    for (i, record) in records.iter().enumerate() {
        if record.len() != COLUMN_COUNT {
            return Err(BicError::MalformedRecord(format!(
                "record {} has {} fields, expected {}",
                i,
                record.len(),
                COLUMN_COUNT
            )));
        }
    }
    Ok(())
}
