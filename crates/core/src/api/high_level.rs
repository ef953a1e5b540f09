//! High-level extraction API.
//!
//! Public entry points for directory extraction:
//! - `headers()` - the constant column header set
//! - `extract_table_from_path()` / `extract_table_from_binary()` -
//!   full-document extraction to records
//! - `convert_to_csv()` - extraction plus CSV file output

use std::path::Path;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::converter;
use crate::document::{Document, Page};
use crate::error::{BicError, Result};
use crate::interp::{PageContent, PageInterpreter};
use crate::layout::columns::ColumnTemplate;
use crate::layout::params::{ColumnParams, LayoutParams};
use crate::layout::rows::cluster_rows;
use crate::table::normalize::normalize_rows;
use crate::table::{assemble_rows, validate_arity, Record, HEADERS};

/// Options for directory extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Row-analysis parameters.
    pub layout: LayoutParams,

    /// Column calibration/segmentation parameters.
    pub columns: ColumnParams,

    /// Worker threads for page processing. `None` uses the available
    /// parallelism; `Some(1)` forces sequential processing. Pages are an
    /// independent unit of work: no record spans a page boundary, so
    /// results are reassembled by plain ordered concatenation.
    pub threads: Option<usize>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            layout: LayoutParams::default(),
            columns: ColumnParams::default(),
            threads: None,
        }
    }
}

/// The constant CSV column headers. No I/O, never fails.
pub fn headers() -> [&'static str; 10] {
    HEADERS
}

/// Extract all directory records from a PDF file on disk.
///
/// Any failure to open or parse the file surfaces as an error whose
/// message is exactly `"Failed to open PDF file"`, with the underlying
/// cause chained as its source.
pub fn extract_table_from_path(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    extract_table_from_path_with(path, &ExtractOptions::default())
}

/// `extract_table_from_path` with explicit options.
pub fn extract_table_from_path_with(
    path: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<Vec<Record>> {
    let data = std::fs::read(path.as_ref())
        .map_err(|e| BicError::OpenFile(Box::new(BicError::Io(e))))?;
    let doc = Document::load(data).map_err(|e| BicError::OpenFile(Box::new(e)))?;
    extract_from_document(&doc, options)
}

/// Extract all directory records from an in-memory PDF.
///
/// A buffer that is not a parseable PDF surfaces as an error whose
/// message is exactly `"Failed to load PDF from bytes"`.
pub fn extract_table_from_binary(data: &[u8]) -> Result<Vec<Record>> {
    extract_table_from_binary_with(data, &ExtractOptions::default())
}

/// `extract_table_from_binary` with explicit options.
pub fn extract_table_from_binary_with(
    data: &[u8],
    options: &ExtractOptions,
) -> Result<Vec<Record>> {
    let doc = Document::load(data.to_vec()).map_err(|e| BicError::LoadBytes(Box::new(e)))?;
    extract_from_document(&doc, options)
}

/// Run extraction on `source` and write CSV to `destination`.
///
/// Returns the number of records written. On failure the destination
/// file state is unspecified.
pub fn convert_to_csv(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<usize> {
    convert_to_csv_with(source, destination, &ExtractOptions::default())
}

/// `convert_to_csv` with explicit options.
pub fn convert_to_csv_with(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<usize> {
    let records = extract_table_from_path_with(source, options)?;
    converter::write_csv(destination.as_ref(), &records)
}

/// Serialize previously extracted records to a CSV string.
pub fn to_csv_string(records: &[Record]) -> Result<String> {
    converter::to_csv_string(records)
}

/// Extraction pipeline over an already-loaded document.
///
/// The first data page calibrates the column template; remaining pages
/// are interpreted in parallel and reassembled in page order. Page 0 is
/// the directory's cover sheet and carries no table.
fn extract_from_document(doc: &Document, options: &ExtractOptions) -> Result<Vec<Record>> {
    let pages: Vec<Page> = doc.pages().collect::<Result<Vec<_>>>()?;
    if pages.len() <= 1 {
        return Ok(Vec::new());
    }
    let data_pages = &pages[1..];

    // Calibration must come from the first data page before fan-out
    let first_content = interpret_page(&data_pages[0], options)?;
    let template = ColumnTemplate::calibrate(&first_content.rulings, &options.columns)?;
    tracing::debug!(slots = template.slots(), "column template calibrated");

    let mut contents: Vec<(usize, Result<PageContent>)> =
        vec![(data_pages[0].index, Ok(first_content))];

    let rest = &data_pages[1..];
    if !rest.is_empty() {
        let threads = options
            .threads
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1)
            })
            .max(1);

        if threads == 1 {
            for page in rest {
                contents.push((page.index, interpret_page(page, options)));
            }
        } else {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| BicError::DecodeError(e.to_string()))?;
            let mut parallel: Vec<(usize, Result<PageContent>)> = pool.install(|| {
                rest.par_iter()
                    .map(|page| (page.index, interpret_page(page, options)))
                    .collect()
            });
            contents.append(&mut parallel);
        }
    }

    contents.sort_by_key(|(index, _)| *index);

    let mut records: Vec<Record> = Vec::new();
    for (page_index, content) in contents {
        let content = content?;
        let bands = cluster_rows(content.fragments, &options.layout);
        let raw_rows = assemble_rows(&bands, &template, &options.columns);
        records.extend(normalize_rows(raw_rows, page_index));
    }

    validate_arity(&records)?;
    Ok(records)
}

fn interpret_page(page: &Page, options: &ExtractOptions) -> Result<PageContent> {
    PageInterpreter::new(&options.layout, &options.columns).run(page)
}
