//! Content stream interpreter.
//!
//! Executes a page's operators while tracking the transformation matrix
//! and text state, and collects two kinds of geometry: positioned text
//! fragments (the glyph runs the table is reconstructed from) and
//! vertical ruling lines (the column separators the template is
//! calibrated from).

use crate::document::Page;
use crate::error::Result;
use crate::layout::params::{ColumnParams, LayoutParams};
use crate::parser::objects::PdfObject;
use crate::parser::parser::{ContentParser, Op};
use crate::utils::{apply_matrix_pt, decode_text, mult_matrix, translate_matrix, Matrix,
                   MATRIX_IDENTITY};

/// Estimated glyph advance as a fraction of the font size. The directory
/// layout keys on text origins, so a rough width is sufficient.
const GLYPH_WIDTH_RATIO: f64 = 0.5;

/// TJ adjustments are expressed in thousandths of the text space unit.
const ADJUSTMENT_DIVISOR: f64 = 1000.0;

/// A positioned run of text in page space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A vertical stroked segment in page space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RulingLine {
    pub x: f64,
    pub y0: f64,
    pub y1: f64,
}

/// Everything the layout stages need from one page.
#[derive(Debug, Default)]
pub struct PageContent {
    pub fragments: Vec<TextFragment>,
    pub rulings: Vec<RulingLine>,
}

/// Text state per PDF text object (subset sufficient for this layout).
#[derive(Debug, Clone)]
struct TextState {
    /// Text line matrix, set by Tm/Td
    matrix: Matrix,
    /// Cursor within the current line (text space)
    line_cursor: (f64, f64),
    leading: f64,
    fontsize: f64,
    charspace: f64,
    wordspace: f64,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: MATRIX_IDENTITY,
            line_cursor: (0.0, 0.0),
            leading: 0.0,
            fontsize: 0.0,
            charspace: 0.0,
            wordspace: 0.0,
        }
    }
}

/// Interprets one page's content streams.
pub struct PageInterpreter<'a> {
    layout: &'a LayoutParams,
    columns: &'a ColumnParams,
    ctm: Matrix,
    gstack: Vec<Matrix>,
    text: TextState,
    /// Start point of the path segment being built (`m`)
    segment_start: Option<(f64, f64)>,
    out: PageContent,
}

impl<'a> PageInterpreter<'a> {
    pub fn new(layout: &'a LayoutParams, columns: &'a ColumnParams) -> Self {
        Self {
            layout,
            columns,
            ctm: MATRIX_IDENTITY,
            gstack: Vec::new(),
            text: TextState::default(),
            segment_start: None,
            out: PageContent::default(),
        }
    }

    /// Execute the page and collect fragments and rulings.
    ///
    /// An unparseable content stream is a hard error (propagated as the
    /// document error); an undecodable text string is skipped.
    pub fn run(mut self, page: &Page) -> Result<PageContent> {
        let [x0, y0, x1, y1] = page.mediabox;

        // Base CTM normalizes rotation and moves the media box origin
        self.ctm = match page.rotate {
            90 => (0.0, -1.0, 1.0, 0.0, -y0, x1),
            180 => (-1.0, 0.0, 0.0, -1.0, x1, y1),
            270 => (0.0, 1.0, -1.0, 0.0, y1, -x0),
            _ => (1.0, 0.0, 0.0, 1.0, -x0, -y0),
        };

        let ops = ContentParser::parse_streams(&page.contents)?;
        for op in &ops {
            self.dispatch(op);
        }
        Ok(self.out)
    }

    fn dispatch(&mut self, op: &Op) {
        let args = &op.operands;
        match op.operator.as_slice() {
            // Graphics state
            b"q" => self.gstack.push(self.ctm),
            b"Q" => {
                if let Some(ctm) = self.gstack.pop() {
                    self.ctm = ctm;
                }
            }
            b"cm" => {
                if let Some(m) = matrix_args(args) {
                    self.ctm = mult_matrix(m, self.ctm);
                }
            }

            // Path construction: only vertical rulings matter here
            b"m" => {
                if let (Some(x), Some(y)) = (num(args, 0), num(args, 1)) {
                    self.segment_start = Some(apply_matrix_pt(self.ctm, (x, y)));
                }
            }
            b"l" => {
                if let (Some(x), Some(y)) = (num(args, 0), num(args, 1)) {
                    let p1 = apply_matrix_pt(self.ctm, (x, y));
                    if let Some(p0) = self.segment_start.take() {
                        self.push_ruling(p0, p1);
                    }
                }
            }
            b"re" => {
                if let (Some(x), Some(y), Some(w), Some(h)) =
                    (num(args, 0), num(args, 1), num(args, 2), num(args, 3))
                {
                    // Rectangle side edges double as rulings for tables
                    // drawn with thin filled rects
                    let bl = apply_matrix_pt(self.ctm, (x, y));
                    let tl = apply_matrix_pt(self.ctm, (x, y + h));
                    let br = apply_matrix_pt(self.ctm, (x + w, y));
                    let tr = apply_matrix_pt(self.ctm, (x + w, y + h));
                    self.push_ruling(bl, tl);
                    self.push_ruling(br, tr);
                    self.segment_start = None;
                }
            }

            // Text object
            b"BT" => {
                self.text.matrix = MATRIX_IDENTITY;
                self.text.line_cursor = (0.0, 0.0);
            }
            b"ET" => {}

            // Text state
            b"Tc" => {
                if let Some(v) = num(args, 0) {
                    self.text.charspace = v;
                }
            }
            b"Tw" => {
                if let Some(v) = num(args, 0) {
                    self.text.wordspace = v;
                }
            }
            b"TL" => {
                if let Some(v) = num(args, 0) {
                    self.text.leading = v;
                }
            }
            b"Tf" => {
                // operands: font name, size
                if let Some(v) = num(args, 1) {
                    self.text.fontsize = v;
                }
            }

            // Text positioning
            b"Td" => {
                if let (Some(tx), Some(ty)) = (num(args, 0), num(args, 1)) {
                    self.text.matrix = translate_matrix(self.text.matrix, (tx, ty));
                    self.text.line_cursor = (0.0, 0.0);
                }
            }
            b"TD" => {
                if let (Some(tx), Some(ty)) = (num(args, 0), num(args, 1)) {
                    self.text.leading = -ty;
                    self.text.matrix = translate_matrix(self.text.matrix, (tx, ty));
                    self.text.line_cursor = (0.0, 0.0);
                }
            }
            b"Tm" => {
                if let Some(m) = matrix_args(args) {
                    self.text.matrix = m;
                    self.text.line_cursor = (0.0, 0.0);
                }
            }
            b"T*" => self.next_line(),

            // Text showing
            b"Tj" => {
                if let Some(PdfObject::String(s)) = args.first() {
                    self.show_text(s);
                }
            }
            b"'" => {
                self.next_line();
                if let Some(PdfObject::String(s)) = args.first() {
                    self.show_text(s);
                }
            }
            b"\"" => {
                // operands: wordspace, charspace, string
                if let Some(v) = num(args, 0) {
                    self.text.wordspace = v;
                }
                if let Some(v) = num(args, 1) {
                    self.text.charspace = v;
                }
                self.next_line();
                if let Some(PdfObject::String(s)) = args.get(2) {
                    self.show_text(s);
                }
            }
            b"TJ" => {
                if let Some(PdfObject::Array(items)) = args.first() {
                    self.show_adjusted(items);
                }
            }

            _ => {}
        }
    }

    fn next_line(&mut self) {
        self.text.matrix = translate_matrix(self.text.matrix, (0.0, -self.text.leading));
        self.text.line_cursor = (0.0, 0.0);
    }

    fn push_ruling(&mut self, p0: (f64, f64), p1: (f64, f64)) {
        if (p0.0 - p1.0).abs() < self.columns.vertical_tolerance && p0.1 != p1.1 {
            self.out.rulings.push(RulingLine {
                x: p0.0,
                y0: p0.1.min(p1.1),
                y1: p0.1.max(p1.1),
            });
        }
    }

    /// Emit one fragment for a Tj/'/" string.
    fn show_text(&mut self, raw: &[u8]) {
        let Some(text) = decode_text(raw) else {
            tracing::debug!(len = raw.len(), "skipping undecodable text string");
            return;
        };
        let advance = self.text_advance(&text);
        self.emit_fragment(text, advance);
        self.text.line_cursor.0 += advance;
    }

    /// Emit one combined fragment for a TJ array, turning large negative
    /// adjustments into word spaces.
    fn show_adjusted(&mut self, items: &[PdfObject]) {
        let mut combined = String::new();
        let mut advance = 0.0;

        for item in items {
            match item {
                PdfObject::String(raw) => match decode_text(raw) {
                    Some(part) => {
                        advance += self.text_advance(&part);
                        combined.push_str(&part);
                    }
                    None => {
                        tracing::debug!(len = raw.len(), "skipping undecodable TJ element");
                    }
                },
                PdfObject::Int(_) | PdfObject::Real(_) => {
                    let delta = item.as_num().unwrap_or(0.0);
                    if delta < self.layout.space_threshold {
                        combined.push(' ');
                    }
                    advance -= delta / ADJUSTMENT_DIVISOR * self.text.fontsize;
                }
                _ => {}
            }
        }

        self.emit_fragment(combined, advance);
        self.text.line_cursor.0 += advance;
    }

    /// Advance in text space for a decoded run.
    fn text_advance(&self, text: &str) -> f64 {
        let chars = text.chars().count() as f64;
        let spaces = text.chars().filter(|c| *c == ' ').count() as f64;
        chars * (GLYPH_WIDTH_RATIO * self.text.fontsize + self.text.charspace)
            + spaces * self.text.wordspace
    }

    fn emit_fragment(&mut self, text: String, advance: f64) {
        if text.trim().is_empty() {
            return;
        }

        let trm = mult_matrix(
            translate_matrix(self.text.matrix, self.text.line_cursor),
            self.ctm,
        );
        let (x, y) = (trm.4, trm.5);
        let x_scale = (trm.0 * trm.0 + trm.1 * trm.1).sqrt();
        let y_scale = (trm.2 * trm.2 + trm.3 * trm.3).sqrt();

        self.out.fragments.push(TextFragment {
            text,
            x,
            y,
            width: advance * x_scale,
            height: self.text.fontsize * y_scale,
        });
    }
}

fn num(args: &[PdfObject], i: usize) -> Option<f64> {
    args.get(i).and_then(|v| v.as_num().ok())
}

fn matrix_args(args: &[PdfObject]) -> Option<Matrix> {
    Some((
        num(args, 0)?,
        num(args, 1)?,
        num(args, 2)?,
        num(args, 3)?,
        num(args, 4)?,
        num(args, 5)?,
    ))
}
