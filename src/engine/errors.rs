use std::io;
use thiserror::Error;
use tracing::{debug, error};

use crate::engine::types::ValueType;
use crate::shared::storage_header::HeaderError;

/// Errors raised while building or reading a column.
#[derive(Debug, Error)]
pub enum ColumnError {
    #[error("row {row} is out of order: next writable row is {next}")]
    OutOfOrder { row: usize, next: usize },

    #[error("value of type {actual} does not match column type {expected}")]
    TypeMismatch {
        expected: ValueType,
        actual: ValueType,
    },

    #[error("column builder already flushed")]
    AlreadyFlushed,

    #[error("corrupt page {page}: {reason}")]
    CorruptPage { page: usize, reason: String },

    #[error("end of column data")]
    EndOfData,

    #[error("invalid builder options: {0}")]
    InvalidOptions(String),

    #[error("compression error: {0}")]
    Compression(String),

    #[error("sketch error: {0}")]
    Sketch(#[from] SketchError),

    #[error("value codec error: {0}")]
    Value(#[from] ValueError),
}

impl ColumnError {
    pub fn corrupt(page: usize, reason: impl Into<String>) -> Self {
        ColumnError::CorruptPage {
            page,
            reason: reason.into(),
        }
    }

    pub fn log_error(&self) {
        match self {
            ColumnError::CorruptPage { page, reason } => {
                error!(target: "logcol::reader", page, "Corrupt page: {}", reason);
            }
            ColumnError::EndOfData => {
                debug!(target: "logcol::reader", "Reached end of column data");
            }
            other => {
                error!(target: "logcol::builder", "Column error: {}", other);
                debug!(target: "logcol::builder", "Column error details: {:?}", other);
            }
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SketchError {
    #[error("precision {0} is outside [4, 18]")]
    InvalidPrecision(u8),

    #[error("cannot merge sketches with precision {left} and {right}")]
    PrecisionMismatch { left: u8, right: u8 },

    #[error("unsupported sketch version {0}")]
    UnsupportedVersion(u8),

    #[error("too short binary")]
    ErrorTooShort,

    #[error("corrupt sketch: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("empty value buffer")]
    Empty,

    #[error("unknown value type tag {0}")]
    UnknownType(u8),

    #[error("truncated {0} payload")]
    Truncated(ValueType),

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
}

/// Errors raised by the single-column file container.
#[derive(Debug, Error)]
pub enum ColumnFileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Metadata serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Invalid header: {0}")]
    InvalidHeader(#[from] HeaderError),

    #[error("Metadata checksum mismatch")]
    ChecksumMismatch,

    #[error("Truncated column file: {0}")]
    Truncated(String),

    #[error("Column metadata disagrees with its pages: {0}")]
    Inconsistent(String),

    #[error("Column error: {0}")]
    Column(#[from] ColumnError),
}
