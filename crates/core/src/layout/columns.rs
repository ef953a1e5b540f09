//! Column template calibration and per-row segmentation.
//!
//! The directory PDF draws vertical separator lines between its ten
//! columns. The template is calibrated once from the first data page's
//! rulings and reused for the rest of the document; later pages may
//! drift by a bounded amount due to pagination, which segmentation
//! absorbs at the template edges.

use crate::error::{BicError, Result};
use crate::interp::RulingLine;
use crate::layout::params::ColumnParams;
use crate::layout::rows::RowBand;
use crate::utils::collapse_whitespace;

/// Fixed horizontal boundaries mapping page-space x to column slots.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTemplate {
    /// Ascending x positions; `columns + 1` entries, the last being the
    /// table's right edge.
    boundaries: Vec<f64>,
}

impl ColumnTemplate {
    /// Calibrate from a page's detected vertical rulings.
    ///
    /// Ruling x positions are sorted and deduplicated within
    /// `dedup_tolerance`; at least `columns + 1` distinct boundaries must
    /// remain or the document does not match the expected layout and the
    /// extraction fails.
    pub fn calibrate(rulings: &[RulingLine], params: &ColumnParams) -> Result<Self> {
        let mut xs: Vec<f64> = rulings.iter().map(|r| r.x).collect();
        xs.sort_by(|a, b| a.total_cmp(b));
        xs.dedup_by(|a, b| (*a - *b).abs() < params.dedup_tolerance);

        let required = params.required_boundaries();
        if xs.len() < required {
            return Err(BicError::Calibration {
                expected: required,
                found: xs.len(),
            });
        }
        xs.truncate(required);

        Ok(Self { boundaries: xs })
    }

    /// Build a template from explicit boundaries (layout revisions,
    /// tests). Boundaries must be ascending and delimit at least one slot.
    pub fn from_boundaries(boundaries: Vec<f64>) -> Result<Self> {
        if boundaries.len() < 2 {
            return Err(BicError::Calibration {
                expected: 2,
                found: boundaries.len(),
            });
        }
        if boundaries.windows(2).any(|w| w[0] >= w[1]) {
            return Err(BicError::SyntaxError(
                "column boundaries must be strictly ascending".into(),
            ));
        }
        Ok(Self { boundaries })
    }

    /// Number of column slots.
    pub fn slots(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Assign a band's fragments to column slots and concatenate the
    /// text per slot. Fragments within `drift` outside the table's edges
    /// snap to the outermost slots; anything further out is page
    /// furniture and is ignored.
    pub fn segment(&self, band: &RowBand, params: &ColumnParams) -> Vec<String> {
        let n = self.slots();
        let mut cells = vec![String::new(); n];

        for frag in &band.fragments {
            let Some(slot) = self.slot_for(frag.x, params.drift) else {
                continue;
            };
            if !cells[slot].is_empty() {
                cells[slot].push(' ');
            }
            cells[slot].push_str(&frag.text);
        }

        cells.iter().map(|c| collapse_whitespace(c)).collect()
    }

    fn slot_for(&self, x: f64, drift: f64) -> Option<usize> {
        let first = self.boundaries[0];
        let last = *self.boundaries.last().unwrap();

        if x < first {
            return (first - x <= drift).then_some(0);
        }
        if x >= last {
            return (x - last <= drift).then_some(self.slots() - 1);
        }
        // boundaries are ascending: find the slot whose range holds x
        let idx = self
            .boundaries
            .iter()
            .rposition(|&b| b <= x)
            .unwrap_or(0);
        Some(idx.min(self.slots() - 1))
    }
}
