//! Row clustering: group page fragments into horizontal bands.

use crate::interp::TextFragment;
use crate::layout::params::LayoutParams;

/// A cluster of fragments sharing a vertical window — one visual table
/// row. Bands are ordered top-to-bottom across the page and fragments
/// left-to-right within a band; neighboring bands' windows are disjoint.
#[derive(Debug, Clone)]
pub struct RowBand {
    /// Reference y of the band (y of its topmost fragment)
    pub y: f64,
    pub fragments: Vec<TextFragment>,
}

/// Partition a page's fragments into row bands.
///
/// Fragments are sorted by descending y (PDF y grows upward, so top of
/// page first) and swept: a fragment within `row_tolerance` of the
/// current band's reference y joins it, anything further opens a new
/// band. Equal-y fragments order by ascending x. When a table region is
/// configured, fragments outside it (headers, footers, page furniture)
/// are dropped before clustering.
pub fn cluster_rows(fragments: Vec<TextFragment>, params: &LayoutParams) -> Vec<RowBand> {
    let mut fragments: Vec<TextFragment> = match params.table_region {
        Some((y_min, y_max)) => fragments
            .into_iter()
            .filter(|f| f.y >= y_min && f.y <= y_max)
            .collect(),
        None => fragments,
    };
    if fragments.is_empty() {
        return Vec::new();
    }

    fragments.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut bands: Vec<RowBand> = Vec::new();
    for frag in fragments {
        match bands.last_mut() {
            Some(band) if (band.y - frag.y).abs() <= params.row_tolerance => {
                band.fragments.push(frag);
            }
            _ => bands.push(RowBand {
                y: frag.y,
                fragments: vec![frag],
            }),
        }
    }

    for band in &mut bands {
        band.fragments.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    bands
}
