//! Document loading: header validation, cross-reference tables, object
//! retrieval and stream decoding.
//!
//! A [`Document`] is created per extraction call and owns the raw bytes
//! for its lifetime; nothing is cached across calls.

pub mod page;

use bytes::Bytes;
use rustc_hash::FxHashMap;

use crate::error::{BicError, Result};
use crate::parser::objects::{Dict, PdfObject, PdfStream};
use crate::parser::parser::ObjectParser;

pub use page::{Page, PageIter};

/// Maximum depth when chasing indirect reference chains.
const MAX_RESOLVE_DEPTH: usize = 32;

/// How far from the end of the file `startxref` may appear.
const STARTXREF_WINDOW: usize = 1024;

/// Location of one object in the file.
#[derive(Debug, Clone, Copy)]
struct XRefEntry {
    /// Byte offset for direct objects; index within the object stream
    /// for compressed objects.
    offset: usize,
    /// Object stream holding this object, when compressed.
    stream_objid: Option<u32>,
}

/// One cross-reference section plus its trailer dictionary.
#[derive(Debug, Default)]
struct XRef {
    offsets: FxHashMap<u32, XRefEntry>,
    trailer: Dict,
}

/// An opened, parsed PDF document.
#[derive(Debug)]
pub struct Document {
    data: Bytes,
    xrefs: Vec<XRef>,
    catalog: Dict,
}

impl Document {
    /// Parse a PDF from raw bytes.
    ///
    /// Fails fast on anything that prevents building a complete document:
    /// missing `%PDF-` header, no usable xref chain, missing `/Root`, or
    /// an `/Encrypt` dictionary (encrypted directories are not supported).
    /// No partial document is ever returned.
    pub fn load(data: impl Into<Bytes>) -> Result<Self> {
        let data: Bytes = data.into();

        if data.len() < 8 || !data.starts_with(b"%PDF-") {
            return Err(BicError::SyntaxError("invalid PDF header".into()));
        }

        let mut doc = Self {
            data,
            xrefs: Vec::new(),
            catalog: Dict::default(),
        };

        let mut loaded = false;
        if let Ok(pos) = doc.find_startxref() {
            if doc.load_xrefs(pos).is_ok() && !doc.xrefs.is_empty() {
                loaded = true;
            }
        }
        if !loaded {
            // Last resort: scan the whole file for "N G obj" headers
            let xref = doc.load_xref_fallback()?;
            doc.xrefs = vec![xref];
        }

        for xref in &doc.xrefs {
            if xref.trailer.contains_key("Encrypt") {
                return Err(BicError::SyntaxError(
                    "encrypted documents are not supported".into(),
                ));
            }
        }

        doc.catalog = doc.find_catalog()?;
        Ok(doc)
    }

    /// Raw file bytes.
    pub fn bytes(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// The document catalog dictionary (`/Root`).
    pub fn catalog(&self) -> &Dict {
        &self.catalog
    }

    /// Iterator over the document's pages in page-tree order.
    pub fn pages(&self) -> PageIter<'_> {
        PageIter::new(self)
    }

    fn find_catalog(&self) -> Result<Dict> {
        for xref in &self.xrefs {
            if let Some(root) = xref.trailer.get("Root") {
                let obj = self.resolve(root)?;
                return Ok(obj.as_dict()?.clone());
            }
        }
        Err(BicError::SyntaxError("no /Root in trailer".into()))
    }

    /// Locate the `startxref` offset by scanning the file tail.
    fn find_startxref(&self) -> Result<usize> {
        let data = self.data.as_ref();
        let needle = b"startxref";
        if data.len() < needle.len() {
            return Err(BicError::SyntaxError("PDF too small".into()));
        }

        let search_start = data.len().saturating_sub(STARTXREF_WINDOW);
        let hay = &data[search_start..];
        let mut found = None;
        for pos in 0..=hay.len().saturating_sub(needle.len()) {
            if &hay[pos..pos + needle.len()] == needle {
                found = Some(search_start + pos);
            }
        }
        let i = found.ok_or(BicError::NoValidXRef)?;

        let rest = &data[i + needle.len()..];
        let mut pos = 0;
        while pos < rest.len() && rest[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let mut end = pos;
        while end < rest.len() && rest[end].is_ascii_digit() {
            end += 1;
        }
        if end == pos {
            return Err(BicError::NoValidXRef);
        }
        std::str::from_utf8(&rest[pos..end])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(BicError::NoValidXRef)
    }

    /// Follow the xref chain (`Prev`, hybrid `XRefStm`) from `pos`.
    fn load_xrefs(&mut self, mut pos: usize) -> Result<()> {
        let mut visited = std::collections::HashSet::new();

        while visited.insert(pos) {
            let xref = self.load_xref_at(pos)?;

            let xref_stm = xref
                .trailer
                .get("XRefStm")
                .and_then(|p| p.as_int().ok())
                .map(|n| n as usize);
            let prev = xref
                .trailer
                .get("Prev")
                .and_then(|p| p.as_int().ok())
                .map(|n| n as usize);

            self.xrefs.push(xref);

            if let Some(stm_pos) = xref_stm {
                if visited.insert(stm_pos) {
                    if let Ok(stm) = self.load_xref_stream(stm_pos) {
                        self.xrefs.push(stm);
                    }
                }
            }

            match prev {
                Some(p) => pos = p,
                None => break,
            }
        }
        Ok(())
    }

    fn load_xref_at(&self, pos: usize) -> Result<XRef> {
        if pos >= self.data.len() {
            return Err(BicError::NoValidXRef);
        }
        if self.data[pos..].starts_with(b"xref") {
            self.load_traditional_xref(pos)
        } else {
            self.load_xref_stream(pos)
        }
    }

    /// Parse a traditional `xref` table and its trailer dictionary.
    fn load_traditional_xref(&self, pos: usize) -> Result<XRef> {
        let mut xref = XRef::default();
        let data = &self.data[pos..];
        let mut cursor = 4; // past "xref"

        loop {
            cursor += skip_ws(&data[cursor..]);
            if cursor >= data.len() {
                break;
            }
            if data[cursor..].starts_with(b"trailer") {
                cursor += 7;
                break;
            }

            let (start_objid, used) = read_number(&data[cursor..])?;
            cursor += used;
            cursor += skip_ws(&data[cursor..]);
            let (count, used) = read_number(&data[cursor..])?;
            cursor += used;
            cursor += skip_line(&data[cursor..]);

            let mut base = start_objid;
            for i in 0..count {
                let (offset, used) = read_number(&data[cursor..])?;
                cursor += used;
                cursor += skip_ws(&data[cursor..]);
                let (genno, used) = read_number(&data[cursor..])?;
                cursor += used;
                cursor += skip_ws(&data[cursor..]);

                let marker = data.get(cursor).copied().unwrap_or(b'f');
                cursor = (cursor + 1).min(data.len());
                cursor += skip_line(&data[cursor..]);

                // Some writers start the first subsection at 1 but still
                // emit the object-0 free entry; realign so later entries map
                // to the right ids.
                if i == 0 && base > 0 && marker == b'f' && offset == 0 && genno == 65535 {
                    base -= 1;
                }

                if marker == b'n' {
                    xref.offsets.insert(
                        (base + i) as u32,
                        XRefEntry {
                            offset: offset as usize,
                            stream_objid: None,
                        },
                    );
                }
            }
        }

        cursor = cursor.min(data.len());
        cursor += skip_ws(&data[cursor..]);
        if data[cursor..].starts_with(b"<<") {
            let mut parser = ObjectParser::new(&data[cursor..]);
            if let Ok(PdfObject::Dict(dict)) = parser.parse_object() {
                xref.trailer = dict;
            }
        }

        Ok(xref)
    }

    /// Parse a cross-reference stream (PDF 1.5+).
    fn load_xref_stream(&self, pos: usize) -> Result<XRef> {
        let obj = self.parse_object_at(pos)?;
        let stream = obj.as_stream()?;

        if stream.get("Type").and_then(|t| t.as_name().ok()) != Some("XRef") {
            return Err(BicError::NoValidXRef);
        }

        let size = stream
            .get("Size")
            .and_then(|s| s.as_int().ok())
            .ok_or(BicError::NoValidXRef)? as usize;

        let widths: Vec<usize> = stream
            .get("W")
            .and_then(|w| w.as_array().ok())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_int().ok())
                    .map(|n| n as usize)
                    .collect()
            })
            .ok_or(BicError::NoValidXRef)?;
        if widths.len() != 3 {
            return Err(BicError::NoValidXRef);
        }
        let entry_len: usize = widths.iter().sum();
        if entry_len == 0 {
            return Err(BicError::NoValidXRef);
        }

        // Index defaults to a single run covering all objects
        let index: Vec<(usize, usize)> = match stream.get("Index").and_then(|v| v.as_array().ok())
        {
            Some(arr) => {
                let nums: Vec<usize> = arr
                    .iter()
                    .filter_map(|v| v.as_int().ok())
                    .map(|n| n as usize)
                    .collect();
                nums.chunks_exact(2).map(|c| (c[0], c[1])).collect()
            }
            None => vec![(0, size)],
        };

        let data = self.decode_stream(stream)?;
        let mut xref = XRef {
            offsets: FxHashMap::default(),
            trailer: stream.attrs.clone(),
        };

        let mut cursor = 0;
        for (start, count) in index {
            for objid in start..start + count {
                if cursor + entry_len > data.len() {
                    break;
                }
                let mut fields = [1u64, 0, 0];
                for (slot, &w) in widths.iter().enumerate() {
                    if w > 0 {
                        fields[slot] = be_uint(&data[cursor..cursor + w]);
                        cursor += w;
                    }
                }
                match fields[0] {
                    1 => {
                        xref.offsets.insert(
                            objid as u32,
                            XRefEntry {
                                offset: fields[1] as usize,
                                stream_objid: None,
                            },
                        );
                    }
                    2 => {
                        xref.offsets.insert(
                            objid as u32,
                            XRefEntry {
                                offset: fields[2] as usize,
                                stream_objid: Some(fields[1] as u32),
                            },
                        );
                    }
                    _ => {} // type 0: free
                }
            }
        }

        Ok(xref)
    }

    /// Brute-force recovery: scan for `N G obj` headers across the file.
    fn load_xref_fallback(&self) -> Result<XRef> {
        let data = self.data.as_ref();
        let mut xref = XRef::default();
        let mut i = 0;

        while i + 3 < data.len() {
            if &data[i..i + 3] == b"obj"
                && data
                    .get(i + 3)
                    .map(|&b| b.is_ascii_whitespace() || b == b'<' || b == b'[')
                    .unwrap_or(true)
            {
                // Walk back over "genno" and "objid"
                // Later definitions win (incremental updates append)
                if let Some((objid, start)) = read_obj_header_backwards(data, i) {
                    xref.offsets.insert(
                        objid,
                        XRefEntry {
                            offset: start,
                            stream_objid: None,
                        },
                    );
                }
            }
            i += 1;
        }

        if xref.offsets.is_empty() {
            return Err(BicError::NoValidXRef);
        }

        // Pick up a trailer dict if one survives
        if let Some(tpos) = find_last(data, b"trailer") {
            let mut parser = ObjectParser::new(&data[tpos + 7..]);
            if let Ok(PdfObject::Dict(dict)) = parser.parse_object() {
                xref.trailer = dict;
            }
        }
        if !xref.trailer.contains_key("Root") {
            // Synthesize a Root by scanning for a /Catalog object
            for (&objid, _) in xref.offsets.iter() {
                if let Ok(obj) = self.parse_object_with(objid, &xref) {
                    if let Ok(dict) = obj.as_dict() {
                        if dict.get("Type").and_then(|t| t.as_name().ok()) == Some("Catalog") {
                            xref.trailer.insert(
                                "Root".into(),
                                PdfObject::Ref(crate::parser::objects::ObjRef::new(objid, 0)),
                            );
                            break;
                        }
                    }
                }
            }
        }

        Ok(xref)
    }

    /// Fetch an indirect object by id.
    pub fn getobj(&self, objid: u32) -> Result<PdfObject> {
        for xref in &self.xrefs {
            if xref.offsets.contains_key(&objid) {
                return self.parse_object_with(objid, xref);
            }
        }
        Err(BicError::ObjectNotFound(objid))
    }

    fn parse_object_with(&self, objid: u32, xref: &XRef) -> Result<PdfObject> {
        let entry = xref
            .offsets
            .get(&objid)
            .ok_or(BicError::ObjectNotFound(objid))?;
        match entry.stream_objid {
            Some(container) => self.parse_object_from_stream(container, entry.offset),
            None => self.parse_object_at(entry.offset),
        }
    }

    /// Resolve indirect references until a direct object is reached.
    pub fn resolve(&self, obj: &PdfObject) -> Result<PdfObject> {
        let mut current = obj.clone();
        for _ in 0..MAX_RESOLVE_DEPTH {
            match current {
                PdfObject::Ref(r) => current = self.getobj(r.objid)?,
                other => return Ok(other),
            }
        }
        Err(BicError::SyntaxError(
            "indirect reference chain too deep".into(),
        ))
    }

    /// Parse the object whose `N G obj` header begins at `offset`.
    fn parse_object_at(&self, offset: usize) -> Result<PdfObject> {
        let data = self.data.as_ref();
        if offset >= data.len() {
            return Err(BicError::SyntaxError(format!(
                "object offset {} exceeds file size {}",
                offset,
                data.len()
            )));
        }

        let mut cursor = offset;
        let (_objid, used) = read_number(&data[cursor..])?;
        cursor += used;
        cursor += skip_ws(&data[cursor..]);
        let (_genno, used) = read_number(&data[cursor..])?;
        cursor += used;
        cursor += skip_ws(&data[cursor..]);

        if !data[cursor..].starts_with(b"obj") {
            return Err(BicError::SyntaxError(format!(
                "expected 'obj' at offset {offset}"
            )));
        }
        cursor += 3;
        cursor += skip_ws(&data[cursor..]);

        let mut parser = ObjectParser::new(&data[cursor..]);
        let obj = parser.parse_object()?;
        let body_pos = cursor + parser.tell();

        // A dict followed by the `stream` keyword is a stream object
        if let PdfObject::Dict(dict) = &obj {
            let mut pos = body_pos + skip_ws(&data[body_pos..]);
            if data[pos..].starts_with(b"stream") {
                pos += 6;
                if data.get(pos) == Some(&b'\r') {
                    pos += 1;
                }
                if data.get(pos) == Some(&b'\n') {
                    pos += 1;
                }

                let declared = dict
                    .get("Length")
                    .and_then(|len| self.resolve(len).ok())
                    .and_then(|len| len.as_int().ok())
                    .filter(|&len| len > 0)
                    .map(|len| len as usize);

                let raw = match declared {
                    Some(len) if pos + len <= data.len() => self.data.slice(pos..pos + len),
                    _ => {
                        // Missing or corrupted /Length: scan for endstream
                        match find_first(&data[pos..], b"endstream") {
                            Some(end) => self.data.slice(pos..pos + end),
                            None => self.data.slice(pos..),
                        }
                    }
                };

                return Ok(PdfObject::Stream(Box::new(PdfStream::new(
                    dict.clone(),
                    raw,
                ))));
            }
        }

        Ok(obj)
    }

    /// Parse a compressed object out of an object stream (`/Type /ObjStm`).
    fn parse_object_from_stream(&self, stream_objid: u32, index: usize) -> Result<PdfObject> {
        let container = self.getobj(stream_objid)?;
        let stream = container.as_stream()?;

        let n = stream
            .get("N")
            .and_then(|v| v.as_int().ok())
            .ok_or_else(|| BicError::SyntaxError("object stream missing /N".into()))? as usize;
        let first = stream
            .get("First")
            .and_then(|v| v.as_int().ok())
            .ok_or_else(|| BicError::SyntaxError("object stream missing /First".into()))?
            as usize;

        if index >= n {
            return Err(BicError::SyntaxError(format!(
                "object index {index} out of range for object stream {stream_objid}"
            )));
        }

        let data = self.decode_stream(stream)?;

        // Header: N pairs of (objid, relative offset)
        let mut header = ObjectParser::new(&data);
        let mut offset = None;
        for i in 0..n {
            let _objid = header.parse_object()?.as_int()?;
            let rel = header.parse_object()?.as_int()? as usize;
            if i == index {
                offset = Some(rel);
                break;
            }
        }
        let rel = offset.ok_or_else(|| {
            BicError::SyntaxError("object stream header shorter than /N".into())
        })?;

        let start = first + rel;
        if start >= data.len() {
            return Err(BicError::SyntaxError(
                "object stream offset out of range".into(),
            ));
        }
        ObjectParser::new(&data[start..]).parse_object()
    }

    /// Decode a stream's data, applying FlateDecode and the PNG predictor
    /// when present. Streams without a filter pass through unchanged.
    pub fn decode_stream(&self, stream: &PdfStream) -> Result<Vec<u8>> {
        let mut output = stream.rawdata().to_vec();

        if let Some(filter) = stream.get("Filter") {
            let filter = self.resolve(filter).unwrap_or_else(|_| filter.clone());
            for name in filter_names(&filter) {
                match name.as_str() {
                    "FlateDecode" | "Fl" => {
                        output = inflate(&output);
                    }
                    other => {
                        return Err(BicError::DecodeError(format!(
                            "unsupported stream filter: {other}"
                        )));
                    }
                }
            }
        }

        if let Some(parms) = stream.get("DecodeParms") {
            let parms = self.resolve(parms).unwrap_or_else(|_| parms.clone());
            if let Some(parms) = decode_parms_dict(&parms) {
                let predictor = parms
                    .get("Predictor")
                    .and_then(|p| p.as_int().ok())
                    .unwrap_or(1) as usize;
                if predictor >= 10 {
                    let columns = parms
                        .get("Columns")
                        .and_then(|c| c.as_int().ok())
                        .unwrap_or(1) as usize;
                    let colors = parms
                        .get("Colors")
                        .and_then(|c| c.as_int().ok())
                        .unwrap_or(1) as usize;
                    let bits = parms
                        .get("BitsPerComponent")
                        .and_then(|b| b.as_int().ok())
                        .unwrap_or(8) as usize;
                    output = png_predictor(&output, columns, colors, bits)?;
                }
            }
        }

        Ok(output)
    }
}

/// Zlib-decompress, falling back to byte-at-a-time partial output for
/// streams with damaged tails (CRC corruption near the end is common in
/// the wild).
fn inflate(data: &[u8]) -> Vec<u8> {
    use std::io::Read;
    let mut decoder = flate2::read::ZlibDecoder::new(data);
    let mut out = Vec::new();
    if decoder.read_to_end(&mut out).is_ok() {
        return out;
    }

    use flate2::{Decompress, FlushDecompress, Status};
    let mut decoder = Decompress::new(true);
    let mut out = Vec::with_capacity(data.len() * 2);
    let mut buf = [0u8; 4096];
    let mut i = 0usize;
    while i < data.len() {
        let before_out = decoder.total_out();
        let before_in = decoder.total_in();
        let res = decoder.decompress(&data[i..i + 1], &mut buf, FlushDecompress::None);
        let produced = (decoder.total_out() - before_out) as usize;
        if produced > 0 {
            out.extend_from_slice(&buf[..produced]);
        }
        let consumed = (decoder.total_in() - before_in) as usize;
        i += consumed.max(1);
        match res {
            Ok(Status::StreamEnd) | Err(_) => break,
            Ok(_) => {}
        }
    }
    out
}

/// Reverse PNG row prediction (sub/up/average/paeth).
fn png_predictor(data: &[u8], columns: usize, colors: usize, bits: usize) -> Result<Vec<u8>> {
    let bpp = (colors * bits).div_ceil(8);
    let row_len = (columns * colors * bits).div_ceil(8);
    if row_len == 0 {
        return Err(BicError::DecodeError("PNG predictor: zero row length".into()));
    }

    let mut out = Vec::with_capacity(data.len());
    let mut prev = vec![0u8; row_len];
    let mut pos = 0;

    while pos < data.len() {
        let ft = data[pos];
        pos += 1;
        if pos >= data.len() {
            break;
        }
        let end = (pos + row_len).min(data.len());
        let mut row = data[pos..end].to_vec();
        row.resize(row_len, 0);
        pos = end;

        match ft {
            0 => {}
            1 => {
                for i in bpp..row_len {
                    row[i] = row[i].wrapping_add(row[i - bpp]);
                }
            }
            2 => {
                for i in 0..row_len {
                    row[i] = row[i].wrapping_add(prev[i]);
                }
            }
            3 => {
                for i in 0..row_len {
                    let left = if i >= bpp { row[i - bpp] as u16 } else { 0 };
                    let up = prev[i] as u16;
                    row[i] = row[i].wrapping_add(((left + up) / 2) as u8);
                }
            }
            4 => {
                for i in 0..row_len {
                    let left = if i >= bpp { row[i - bpp] } else { 0 };
                    let up = prev[i];
                    let ul = if i >= bpp { prev[i - bpp] } else { 0 };
                    row[i] = row[i].wrapping_add(paeth(left, up, ul));
                }
            }
            other => {
                return Err(BicError::DecodeError(format!(
                    "PNG predictor: unknown filter type {other}"
                )));
            }
        }

        out.extend_from_slice(&row);
        prev = row;
    }

    Ok(out)
}

fn paeth(left: u8, above: u8, upper_left: u8) -> u8 {
    let p = left as i16 + above as i16 - upper_left as i16;
    let pa = (p - left as i16).abs();
    let pb = (p - above as i16).abs();
    let pc = (p - upper_left as i16).abs();
    if pa <= pb && pa <= pc {
        left
    } else if pb <= pc {
        above
    } else {
        upper_left
    }
}

/// Collect filter names from a /Filter entry (name or array of names).
fn filter_names(filter: &PdfObject) -> Vec<String> {
    match filter {
        PdfObject::Name(name) => vec![name.clone()],
        PdfObject::Array(arr) => arr
            .iter()
            .filter_map(|v| v.as_name().ok().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    }
}

/// Extract the parameter dict from /DecodeParms (dict or one-element array).
fn decode_parms_dict(parms: &PdfObject) -> Option<&Dict> {
    match parms {
        PdfObject::Dict(d) => Some(d),
        PdfObject::Array(arr) => arr.first().and_then(|p| p.as_dict().ok()),
        _ => None,
    }
}

/// Big-endian unsigned integer from up to 8 bytes.
fn be_uint(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| acc << 8 | b as u64)
}

/// Read a decimal number, returning (value, bytes consumed).
fn read_number(data: &[u8]) -> Result<(i64, usize)> {
    let mut end = 0;
    while end < data.len() && data[end].is_ascii_digit() {
        end += 1;
    }
    if end == 0 {
        return Err(BicError::SyntaxError("expected number".into()));
    }
    let value = std::str::from_utf8(&data[..end])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| BicError::SyntaxError("invalid number".into()))?;
    Ok((value, end))
}

fn skip_ws(data: &[u8]) -> usize {
    let mut i = 0;
    while i < data.len() && data[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Skip to the start of the next line.
fn skip_line(data: &[u8]) -> usize {
    let mut i = 0;
    while i < data.len() && data[i] != b'\n' && data[i] != b'\r' {
        i += 1;
    }
    while i < data.len() && (data[i] == b'\n' || data[i] == b'\r') {
        i += 1;
    }
    i
}

fn find_first(data: &[u8], needle: &[u8]) -> Option<usize> {
    data.windows(needle.len()).position(|w| w == needle)
}

fn find_last(data: &[u8], needle: &[u8]) -> Option<usize> {
    data.windows(needle.len()).rposition(|w| w == needle)
}

/// Given the position of an `obj` keyword, walk backwards over
/// `objid genno` and return (objid, header start offset).
fn read_obj_header_backwards(data: &[u8], obj_pos: usize) -> Option<(u32, usize)> {
    let mut i = obj_pos;
    // whitespace before "obj"
    while i > 0 && data[i - 1].is_ascii_whitespace() {
        i -= 1;
    }
    // generation number
    let gen_end = i;
    while i > 0 && data[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i == gen_end {
        return None;
    }
    // whitespace between objid and genno
    while i > 0 && data[i - 1].is_ascii_whitespace() {
        i -= 1;
    }
    // object id
    let id_end = i;
    while i > 0 && data[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i == id_end {
        return None;
    }
    let objid = std::str::from_utf8(&data[i..id_end]).ok()?.parse().ok()?;
    Some((objid, i))
}
