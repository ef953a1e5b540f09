//! bicdir - BIC directory PDF table extraction.
//!
//! Recovers the tabular records of the ISO 9362 BIC directory from its
//! published PDF, which renders the table as positioned text with no
//! embedded structure. The pipeline: load the document, interpret each
//! page's content stream into positioned fragments and ruling lines,
//! cluster fragments into rows, segment rows into the ten-column
//! template calibrated from the rulings, normalize fields, and assemble
//! page results into one ordered record sequence (optionally serialized
//! as CSV).

pub mod api;
pub mod converter;
pub mod document;
pub mod error;
pub mod interp;
pub mod layout;
pub mod parser;
pub mod table;
pub mod utils;

pub use api::high_level;
pub use api::{
    convert_to_csv, extract_table_from_binary, extract_table_from_path, guarded, headers,
    to_csv_string, ExtractOptions,
};
pub use error::{BicError, Result};
pub use table::{Record, COLUMN_COUNT, HEADERS};
