//! Content stream interpretation: glyph runs and ruling geometry.

pub mod interpreter;

pub use interpreter::{PageContent, PageInterpreter, RulingLine, TextFragment};
