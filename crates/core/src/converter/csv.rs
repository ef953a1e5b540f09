//! CSV serialization of extracted records.
//!
//! The first line is always the constant header set; one line per record
//! in assembler order. Quoting follows RFC 4180 (fields containing the
//! delimiter, quotes or line breaks are quoted), and output is
//! byte-for-byte deterministic for identical input.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{BicError, Result};
use crate::table::{Record, HEADERS};

/// Serialize records to an in-memory CSV string.
pub fn to_csv_string(records: &[Record]) -> Result<String> {
    let mut buf = Vec::new();
    write_records(&mut buf, records)?;
    String::from_utf8(buf).map_err(|e| BicError::DecodeError(e.to_string()))
}

/// Write records as CSV to `destination`, returning the record count.
///
/// No atomicity is promised: on failure the destination state is
/// unspecified.
pub fn write_csv(destination: &Path, records: &[Record]) -> Result<usize> {
    let file = File::create(destination)?;
    write_records(file, records)?;
    Ok(records.len())
}

fn write_records<W: Write>(writer: W, records: &[Record]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS)?;
    for record in records {
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}
