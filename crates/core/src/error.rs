//! Error types for the bicdir extraction engine.

use thiserror::Error;

/// Primary error type for directory extraction operations.
#[derive(Error, Debug)]
pub enum BicError {
    #[error("invalid token at position {pos}: {msg}")]
    TokenError { pos: usize, msg: String },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("type error: expected {expected}, got {got}")]
    TypeError {
        expected: &'static str,
        got: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF object not found: {0}")]
    ObjectNotFound(u32),

    #[error("no valid xref table found")]
    NoValidXRef,

    #[error("PDF syntax error: {0}")]
    SyntaxError(String),

    #[error("decode error: {0}")]
    DecodeError(String),

    #[error(
        "column calibration failed: expected at least {expected} ruling lines, found {found}"
    )]
    Calibration { expected: usize, found: usize },

    #[error("malformed record: {0}")]
    MalformedRecord(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Path-based load failure. The Display text is a stable contract
    /// relied upon by hosts; the underlying cause stays on the source chain.
    #[error("Failed to open PDF file")]
    OpenFile(#[source] Box<BicError>),

    /// Byte-based load failure. Same stable-text contract as `OpenFile`.
    #[error("Failed to load PDF from bytes")]
    LoadBytes(#[source] Box<BicError>),

    /// A panic caught at the call boundary by [`crate::api::guard`].
    #[error("internal fault: {0}")]
    Fault(String),
}

/// Convenience Result type alias for BicError.
pub type Result<T> = std::result::Result<T, BicError>;
