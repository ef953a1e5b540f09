//! Page objects and page-tree traversal.

use std::collections::HashSet;

use crate::document::Document;
use crate::error::{BicError, Result};
use crate::parser::objects::{Dict, PdfObject};

/// A single page: geometry plus decoded content streams.
///
/// Read-only once built; pages exist only for the duration of one
/// extraction call.
#[derive(Debug)]
pub struct Page {
    /// Zero-based position in document order
    pub index: usize,
    /// Page object id
    pub objid: u32,
    /// Media box (physical page size)
    pub mediabox: [f64; 4],
    /// Page rotation in degrees (normalized to 0/90/180/270)
    pub rotate: i64,
    /// Decoded content stream data
    pub contents: Vec<Vec<u8>>,
}

impl Page {
    /// Inheritable page-tree attributes.
    const INHERITABLE_ATTRS: &'static [&'static str] = &["Resources", "MediaBox", "Rotate"];

    fn from_attrs(index: usize, objid: u32, attrs: &Dict, doc: &Document) -> Result<Self> {
        let mediabox = parse_box(attrs, "MediaBox", doc)
            .ok_or_else(|| BicError::SyntaxError(format!("page {objid}: MediaBox missing")))?;
        let rotate = attrs
            .get("Rotate")
            .and_then(|r| doc.resolve(r).ok())
            .and_then(|r| r.as_int().ok())
            .map(|r| (r % 360 + 360) % 360)
            .unwrap_or(0);
        let contents = parse_contents(attrs, doc)?;

        Ok(Self {
            index,
            objid,
            mediabox,
            rotate,
            contents,
        })
    }
}

/// Decode the page's /Contents (single stream or array of streams).
///
/// An unreadable content stream is a hard error for the page: the table
/// cannot be reconstructed from partial operators.
fn parse_contents(attrs: &Dict, doc: &Document) -> Result<Vec<Vec<u8>>> {
    let contents = match attrs.get("Contents") {
        Some(obj) => doc.resolve(obj)?,
        None => return Ok(Vec::new()),
    };

    match &contents {
        PdfObject::Stream(stream) => Ok(vec![doc.decode_stream(stream)?]),
        PdfObject::Array(arr) => {
            let mut out = Vec::with_capacity(arr.len());
            for item in arr {
                let resolved = doc.resolve(item)?;
                out.push(doc.decode_stream(resolved.as_stream()?)?);
            }
            Ok(out)
        }
        _ => Err(BicError::SyntaxError(
            "page /Contents is neither stream nor array".into(),
        )),
    }
}

fn parse_box(attrs: &Dict, key: &str, doc: &Document) -> Option<[f64; 4]> {
    let obj = attrs.get(key)?;
    let resolved = doc.resolve(obj).ok()?;
    let arr = resolved.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let mut coords = [0.0; 4];
    for (slot, item) in coords.iter_mut().zip(arr) {
        *slot = doc.resolve(item).ok()?.as_num().ok()?;
    }
    Some(coords)
}

/// Depth-first iterator over the document's page tree.
///
/// Inheritable attributes (Resources, MediaBox, Rotate) flow from
/// intermediate `Pages` nodes to leaves; a visited set guards against
/// malicious reference cycles.
pub struct PageIter<'a> {
    doc: &'a Document,
    /// Traversal stack: (objid, inherited attributes)
    stack: Vec<(u32, Dict)>,
    visited: HashSet<u32>,
    next_index: usize,
}

impl<'a> PageIter<'a> {
    pub(crate) fn new(doc: &'a Document) -> Self {
        let stack = match doc
            .catalog()
            .get("Pages")
            .and_then(|p| p.as_objref().ok())
        {
            Some(root) => vec![(root.objid, doc.catalog().clone())],
            None => Vec::new(),
        };
        Self {
            doc,
            stack,
            visited: HashSet::new(),
            next_index: 0,
        }
    }
}

impl<'a> Iterator for PageIter<'a> {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((objid, parent_attrs)) = self.stack.pop() {
            if !self.visited.insert(objid) {
                continue;
            }

            let dict = match self.doc.getobj(objid).and_then(|o| Ok(o.as_dict()?.clone())) {
                Ok(d) => d,
                Err(_) => continue,
            };

            // Merge inheritable attributes from the parent node
            let mut attrs = dict.clone();
            for &key in Page::INHERITABLE_ATTRS {
                if !attrs.contains_key(key) {
                    if let Some(val) = parent_attrs.get(key) {
                        attrs.insert(key.to_string(), val.clone());
                    }
                }
            }

            match dict.get("Type").and_then(|t| t.as_name().ok()) {
                Some("Pages") => {
                    if let Some(kids) = dict.get("Kids") {
                        if let Ok(kids) = self.doc.resolve(kids) {
                            if let Ok(arr) = kids.as_array() {
                                for kid in arr.iter().rev() {
                                    if let Ok(r) = kid.as_objref() {
                                        self.stack.push((r.objid, attrs.clone()));
                                    }
                                }
                            }
                        }
                    }
                }
                Some("Page") => {
                    let index = self.next_index;
                    self.next_index += 1;
                    return Some(Page::from_attrs(index, objid, &attrs, self.doc));
                }
                _ => {}
            }
        }
        None
    }
}
