//! PDF syntax layer: tokenizer, object model, object and content parsers.

pub mod lexer;
pub mod objects;
pub mod parser;

pub use lexer::{Lexer, Token};
pub use objects::{Dict, ObjRef, PdfObject, PdfStream};
pub use parser::{ContentParser, ObjectParser, Op};
