//! Parsers that assemble lexer tokens into PDF objects.
//!
//! `ObjectParser` handles object syntax (dicts, arrays, indirect
//! references); `ContentParser` flattens a page's content streams into a
//! sequence of operator applications for the interpreter.

use crate::error::{BicError, Result};
use crate::parser::lexer::{Lexer, Token};
use crate::parser::objects::{Dict, ObjRef, PdfObject};

/// Parses PDF object syntax on top of the lexer, resolving the
/// `objid genno R` indirect-reference pattern with token lookahead.
pub struct ObjectParser<'a> {
    lexer: Lexer<'a>,
    lookahead: Vec<Token>,
}

impl<'a> ObjectParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            lexer: Lexer::new(data),
            lookahead: Vec::new(),
        }
    }

    /// Current position in the underlying data.
    pub fn tell(&self) -> usize {
        self.lexer.tell()
    }

    /// Remaining unparsed data.
    pub fn remaining(&self) -> &'a [u8] {
        self.lexer.remaining()
    }

    fn next_token(&mut self) -> Result<Option<Token>> {
        if let Some(tok) = self.lookahead.pop() {
            return Ok(Some(tok));
        }
        match self.lexer.next_token() {
            Some(Ok((_, tok))) => Ok(Some(tok)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    fn push_back(&mut self, tok: Token) {
        self.lookahead.push(tok);
    }

    /// Parse the next PDF object.
    pub fn parse_object(&mut self) -> Result<PdfObject> {
        let token = self.next_token()?.ok_or(BicError::UnexpectedEof)?;
        self.token_to_object(token)
    }

    fn token_to_object(&mut self, token: Token) -> Result<PdfObject> {
        match token {
            Token::Int(n) => {
                // Possible start of an indirect reference: objid genno R
                if let Ok(Some(tok2)) = self.next_token() {
                    if let Token::Int(m) = tok2 {
                        if let Ok(Some(tok3)) = self.next_token() {
                            if matches!(&tok3, Token::Keyword(kw) if kw == b"R") {
                                return Ok(PdfObject::Ref(ObjRef::new(n as u32, m as u32)));
                            }
                            self.push_back(tok3);
                        }
                        self.push_back(Token::Int(m));
                    } else {
                        self.push_back(tok2);
                    }
                }
                Ok(PdfObject::Int(n))
            }
            Token::Real(n) => Ok(PdfObject::Real(n)),
            Token::Bool(b) => Ok(PdfObject::Bool(b)),
            Token::Name(s) => Ok(PdfObject::Name(s)),
            Token::Str(s) => Ok(PdfObject::String(s)),
            Token::Keyword(kw) => {
                if kw == b"null" {
                    return Ok(PdfObject::Null);
                }
                if kw == b"[" {
                    return self.parse_array();
                }
                if kw == b"<<" {
                    return self.parse_dict();
                }
                Err(BicError::TokenError {
                    pos: self.lexer.tell(),
                    msg: format!("unexpected keyword: {}", String::from_utf8_lossy(&kw)),
                })
            }
        }
    }

    /// Parse array contents until `]`.
    fn parse_array(&mut self) -> Result<PdfObject> {
        let mut arr = Vec::new();
        loop {
            let token = self.next_token()?.ok_or(BicError::UnexpectedEof)?;
            if matches!(&token, Token::Keyword(kw) if kw == b"]") {
                break;
            }
            arr.push(self.token_to_object(token)?);
        }
        Ok(PdfObject::Array(arr))
    }

    /// Parse dict contents until `>>`.
    fn parse_dict(&mut self) -> Result<PdfObject> {
        let mut dict = Dict::default();
        loop {
            let token = self.next_token()?.ok_or(BicError::UnexpectedEof)?;
            if matches!(&token, Token::Keyword(kw) if kw == b">>") {
                break;
            }
            let key = match token {
                Token::Name(name) => name,
                _ => {
                    return Err(BicError::TokenError {
                        pos: self.lexer.tell(),
                        msg: "expected name as dict key".into(),
                    });
                }
            };
            let value = self.parse_object()?;
            dict.insert(key, value);
        }
        Ok(PdfObject::Dict(dict))
    }
}

/// A single content stream operation: operator plus operands.
#[derive(Debug, Clone)]
pub struct Op {
    /// The operator bytes (e.g., `BT`, `Tm`, `Tj`)
    pub operator: Vec<u8>,
    /// Operands preceding the operator, in source order
    pub operands: Vec<PdfObject>,
}

/// Parser for page content streams.
pub struct ContentParser;

impl ContentParser {
    /// Parse the concatenation of a page's content streams into an
    /// operation list. Multiple streams form one logical stream, so they
    /// are joined with newlines before tokenizing.
    pub fn parse_streams(streams: &[Vec<u8>]) -> Result<Vec<Op>> {
        match streams {
            [] => Ok(Vec::new()),
            [single] => Self::parse(single),
            many => {
                let total: usize = many.iter().map(|s| s.len() + 1).sum();
                let mut joined = Vec::with_capacity(total);
                for s in many {
                    joined.extend_from_slice(s);
                    joined.push(b'\n');
                }
                Self::parse(&joined)
            }
        }
    }

    /// Parse one content stream into operations.
    pub fn parse(data: &[u8]) -> Result<Vec<Op>> {
        let mut lexer = Lexer::new(data);
        let mut ops = Vec::new();
        let mut operands: Vec<PdfObject> = Vec::new();
        let mut context_stack: Vec<Vec<PdfObject>> = Vec::new();

        while let Some(result) = lexer.next_token() {
            let (_, token) = result?;
            match token {
                Token::Keyword(kw) => {
                    // Array and dict delimiters build compound operands
                    if kw == b"[" {
                        context_stack.push(std::mem::take(&mut operands));
                        continue;
                    }
                    if kw == b"]" {
                        let contents = std::mem::take(&mut operands);
                        operands = context_stack.pop().unwrap_or_default();
                        operands.push(PdfObject::Array(contents));
                        continue;
                    }
                    if kw == b"<<" {
                        context_stack.push(std::mem::take(&mut operands));
                        continue;
                    }
                    if kw == b">>" {
                        let contents = std::mem::take(&mut operands);
                        operands = context_stack.pop().unwrap_or_default();
                        operands.push(PdfObject::Dict(Self::pairs_to_dict(contents)));
                        continue;
                    }
                    if kw == b"null" {
                        operands.push(PdfObject::Null);
                        continue;
                    }

                    // Inline image body is raw binary; skip to EI
                    if kw == b"BI" {
                        lexer.skip_inline_image();
                        operands.clear();
                        continue;
                    }

                    ops.push(Op {
                        operator: kw,
                        operands: std::mem::take(&mut operands),
                    });
                }
                Token::Int(n) => operands.push(PdfObject::Int(n)),
                Token::Real(n) => operands.push(PdfObject::Real(n)),
                Token::Bool(b) => operands.push(PdfObject::Bool(b)),
                Token::Name(s) => operands.push(PdfObject::Name(s)),
                Token::Str(s) => operands.push(PdfObject::String(s)),
            }
        }

        Ok(ops)
    }

    /// Fold an alternating name/value sequence into a dictionary.
    fn pairs_to_dict(objs: Vec<PdfObject>) -> Dict {
        let mut dict = Dict::default();
        let mut iter = objs.into_iter();
        while let Some(key) = iter.next() {
            if let PdfObject::Name(name) = key {
                if let Some(value) = iter.next() {
                    dict.insert(name, value);
                }
            }
        }
        dict
    }
}
