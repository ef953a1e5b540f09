//! Shared fixture builder: synthesizes small BIC-directory-style PDFs
//! (cover sheet + ruled data pages, uncompressed streams, computed xref)
//! so integration tests can exercise the whole pipeline without the
//! non-redistributable published directory.

#![allow(dead_code)]

/// Column boundaries used by the synthetic layout: 11 ruled lines
/// delimiting the 10 directory columns.
pub const BOUNDARIES: [f64; 11] = [
    40.0, 100.0, 160.0, 225.0, 275.0, 395.0, 515.0, 635.0, 695.0, 755.0, 800.0,
];

/// Vertical extent of the ruled table body.
pub const TABLE_TOP: f64 = 560.0;
pub const TABLE_BOTTOM: f64 = 40.0;

/// y of the first visual row and the per-row step.
pub const FIRST_ROW_Y: f64 = 520.0;
pub const ROW_STEP: f64 = 13.0;

/// x where a cell's text starts inside its column.
pub fn cell_x(col: usize) -> f64 {
    BOUNDARIES[col] + 3.0
}

/// One visual row: (column slot, text) pairs.
pub type VisualRow = Vec<(usize, String)>;

/// Build a visual row from string slices.
pub fn row(cells: &[(usize, &str)]) -> VisualRow {
    cells.iter().map(|(c, t)| (*c, t.to_string())).collect()
}

/// Specification of one data page.
pub struct PageSpec {
    pub rows: Vec<VisualRow>,
    /// Draw the 11 vertical column rulings
    pub rulings: bool,
    /// Repeat the column-header row at the top of the table
    pub header_row: bool,
    /// Draw the page banner above the table body
    pub banner: bool,
}

impl PageSpec {
    pub fn data() -> Self {
        Self {
            rows: Vec::new(),
            rulings: true,
            header_row: true,
            banner: true,
        }
    }

    pub fn row(mut self, cells: &[(usize, &str)]) -> Self {
        self.rows.push(row(cells));
        self
    }

    pub fn push_row(mut self, row: VisualRow) -> Self {
        self.rows.push(row);
        self
    }
}

/// Escape a byte string for a PDF literal string.
fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }
    out
}

/// Encode text as a PDF string operand: plain literal for ASCII,
/// UTF-16BE hex string (with BOM) otherwise — the encoding the published
/// directory uses for accented names and addresses.
pub fn pdf_string(text: &str) -> String {
    if text.is_ascii() {
        format!("({})", escape_literal(text))
    } else {
        let mut hex = String::from("<FEFF");
        for unit in text.encode_utf16() {
            hex.push_str(&format!("{unit:04X}"));
        }
        hex.push('>');
        hex
    }
}

/// Render one cell as content-stream ops.
fn cell_ops(col: usize, y: f64, text: &str) -> String {
    format!(
        "1 0 0 1 {:.1} {:.1} Tm {} Tj\n",
        cell_x(col),
        y,
        pdf_string(text)
    )
}

/// Render a data page's content stream.
fn page_content(spec: &PageSpec) -> String {
    let mut s = String::new();

    if spec.rulings {
        s.push_str("0.5 w\n");
        for x in BOUNDARIES {
            s.push_str(&format!(
                "{x:.1} {TABLE_BOTTOM:.1} m {x:.1} {TABLE_TOP:.1} l S\n"
            ));
        }
    }

    s.push_str("BT\n/F1 8 Tf\n");

    if spec.banner {
        s.push_str("1 0 0 1 320 575 Tm (ISO BIC Directory) Tj\n");
    }

    if spec.header_row {
        let labels = [
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
        for (col, label) in labels.iter().enumerate() {
            s.push_str(&cell_ops(col, 545.0, label));
        }
    }

    for (i, visual_row) in spec.rows.iter().enumerate() {
        let y = FIRST_ROW_Y - i as f64 * ROW_STEP;
        for (col, text) in visual_row {
            s.push_str(&cell_ops(*col, y, text));
        }
    }

    s.push_str("ET\n");
    s
}

/// Content stream for the cover sheet (page 0, no table).
fn cover_content() -> String {
    "BT\n/F1 18 Tf\n1 0 0 1 260 400 Tm (ISO 9362 BIC Directory) Tj\n\
     1 0 0 1 300 370 Tm (Registration Authority) Tj\nET\n"
        .to_string()
}

/// Assemble a complete PDF: catalog, page tree, cover page, and one
/// page+stream object pair per data page, with a computed xref table.
pub fn build_pdf(pages: &[PageSpec]) -> Vec<u8> {
    let streams: Vec<String> = std::iter::once(cover_content())
        .chain(pages.iter().map(page_content))
        .collect();
    build_pdf_with_streams(&streams)
}

/// Lower-level entry: build a PDF whose page contents are the given
/// streams (the first stream is the cover page).
pub fn build_pdf_with_streams(streams: &[String]) -> Vec<u8> {
    let page_count = streams.len();
    // ids: 1 catalog, 2 pages, then (page, content) pairs
    let page_id = |i: usize| 3 + 2 * i;
    let content_id = |i: usize| 4 + 2 * i;
    let last_id = 2 + 2 * page_count;

    let kids: Vec<String> = (0..page_count).map(|i| format!("{} 0 R", page_id(i))).collect();

    let mut objects: Vec<(usize, String)> = Vec::new();
    objects.push((1, "<< /Type /Catalog /Pages 2 0 R >>".to_string()));
    objects.push((
        2,
        format!(
            "<< /Type /Pages /Kids [ {} ] /Count {} /MediaBox [ 0 0 842 595 ] \
             /Resources << /Font << /F1 {} 0 R >> >> >>",
            kids.join(" "),
            page_count,
            last_id + 1,
        ),
    ));
    for (i, stream) in streams.iter().enumerate() {
        objects.push((
            page_id(i),
            format!(
                "<< /Type /Page /Parent 2 0 R /Contents {} 0 R >>",
                content_id(i)
            ),
        ));
        objects.push((
            content_id(i),
            format!(
                "<< /Length {} >>\nstream\n{}endstream",
                stream.len(),
                stream
            ),
        ));
    }
    objects.push((
        last_id + 1,
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ));
    objects.sort_by_key(|(id, _)| *id);

    let mut body: Vec<u8> = Vec::new();
    body.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    let mut offsets = vec![0usize; objects.len() + 2];
    for (id, content) in &objects {
        offsets[*id] = body.len();
        body.extend_from_slice(format!("{id} 0 obj\n{content}\nendobj\n").as_bytes());
    }

    let xref_pos = body.len();
    let size = objects.len() + 1;
    body.extend_from_slice(format!("xref\n0 {size}\n").as_bytes());
    body.extend_from_slice(b"0000000000 65535 f \n");
    for (id, _) in &objects {
        body.extend_from_slice(format!("{:010} 00000 n \n", offsets[*id]).as_bytes());
    }
    body.extend_from_slice(
        format!(
            "trailer\n<< /Size {size} /Root 1 0 R >>\nstartxref\n{xref_pos}\n%%EOF\n"
        )
        .as_bytes(),
    );

    body
}

/// The reference record from the top of the directory, spread over three
/// visual rows the way the published PDF wraps it.
pub fn yettel_rows() -> Vec<VisualRow> {
    vec![
        row(&[
            (0, "1997-03-01"),
            (1, "2024-06-06"),
            (2, "AAAARSBG"),
            (3, "XXX"),
            (4, "YETTEL BANK AD"),
            (5, "88 OMLADINSKIH BRIGADA"),
            (6, "88 OMLADINSKIH BRIGADA"),
            (9, "FIIN"),
        ]),
        row(&[(5, "BEOGRAD 11070 SERBIA"), (6, "BEOGRAD 11070 BEOGRAD")]),
        row(&[(6, "SERBIA")]),
    ]
}

/// The finalized reference record after continuation merging.
pub fn yettel_record() -> Vec<String> {
    [
        "1997-03-01",
        "2024-06-06",
        "AAAARSBG",
        "XXX",
        "YETTEL BANK AD",
        "88 OMLADINSKIH BRIGADA BEOGRAD 11070 SERBIA",
        "88 OMLADINSKIH BRIGADA BEOGRAD 11070 BEOGRAD SERBIA",
        "",
        "",
        "FIIN",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// A two-data-page directory with four records, including a wrapped
/// record, a non-ASCII name, and per-page repeated headers.
pub fn sample_directory() -> Vec<u8> {
    let page1 = PageSpec {
        rows: yettel_rows(),
        ..PageSpec::data()
    }
    .row(&[
        (0, "2000-11-15"),
        (1, "2023-01-09"),
        (2, "AAACKWKW"),
        (3, "XXX"),
        (4, "ALMUZAINI EXCHANGE COMPANY"),
        (5, "MUBARAK AL KABIR STREET KUWAIT CITY KUWAIT"),
        (6, "KUWAIT CITY KUWAIT"),
        (9, "FIIN"),
    ]);

    let page2 = PageSpec::data()
        .row(&[
            (0, "1995-06-02"),
            (1, "2021-09-30"),
            (2, "AAADFRP1"),
            (3, "XXX"),
            (4, "BANQUE D\u{C9}FINITIVE"),
            (5, "12 RUE DE LA PAIX PARIS FRANCE"),
            (6, "PARIS FRANCE"),
            (9, "FIIN"),
        ])
        .row(&[
            (0, "2010-04-19"),
            (1, "2024-02-29"),
            (2, "AAAJBJ22"),
            (3, "KKT"),
            (4, "EXAMPLE SAVINGS BANK"),
            (5, "1 HARBOUR ROAD"),
            (6, "1 HARBOUR ROAD"),
            (7, "TREASURY DESK"),
            (8, "1 HARBOUR ROAD"),
            (9, "FIIN"),
        ]);

    build_pdf(&[page1, page2])
}

/// All finalized records of [`sample_directory`], in document order.
pub fn sample_records() -> Vec<Vec<String>> {
    let to_rec = |cells: [&str; 10]| -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    };
    vec![
        yettel_record(),
        to_rec([
            "2000-11-15",
            "2023-01-09",
            "AAACKWKW",
            "XXX",
            "ALMUZAINI EXCHANGE COMPANY",
            "MUBARAK AL KABIR STREET KUWAIT CITY KUWAIT",
            "KUWAIT CITY KUWAIT",
            "",
            "",
            "FIIN",
        ]),
        to_rec([
            "1995-06-02",
            "2021-09-30",
            "AAADFRP1",
            "XXX",
            "BANQUE D\u{C9}FINITIVE",
            "12 RUE DE LA PAIX PARIS FRANCE",
            "PARIS FRANCE",
            "",
            "",
            "FIIN",
        ]),
        to_rec([
            "2010-04-19",
            "2024-02-29",
            "AAAJBJ22",
            "KKT",
            "EXAMPLE SAVINGS BANK",
            "1 HARBOUR ROAD",
            "1 HARBOUR ROAD",
            "TREASURY DESK",
            "1 HARBOUR ROAD",
            "FIIN",
        ]),
    ]
}
