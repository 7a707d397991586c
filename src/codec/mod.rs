//! Output encoders over the full record set.
//!
//! The snapshot and export forms are separate encoders with their own field
//! lists; the export form never carries the diet type.

/// Diet-less export document.
pub mod export;
/// Fixed-layout binary final-state snapshot.
pub mod snapshot;

use std::io;

use thiserror::Error;

use crate::persist::StoreError;

/// Encoding, decoding, and file failures.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Reading or writing the target failed. A partially written file is left
    /// in place.
    #[error("i/o: {0}")]
    Io(#[from] io::Error),
    /// Listing the store failed.
    #[error("store: {0}")]
    Store(#[from] StoreError),
    /// Export payload (de)serialization failed.
    #[error("export payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The input ended inside a field.
    #[error("truncated input while reading {field}")]
    Truncated {
        /// Field being read.
        field: &'static str,
    },
    /// A count or length prefix is negative.
    #[error("negative length {value} for {field}")]
    NegativeLength {
        /// Field being read.
        field: &'static str,
        /// Raw prefix.
        value: i32,
    },
    /// A count or length does not fit the 32-bit prefix.
    #[error("{field} is too long to encode ({len})")]
    TooLong {
        /// Field being written.
        field: &'static str,
        /// Actual length.
        len: usize,
    },
    /// String bytes are not UTF-8.
    #[error("invalid utf-8 in {field}")]
    InvalidUtf8 {
        /// Field being read.
        field: &'static str,
    },
    /// Enum text does not name a variant.
    #[error("unknown {field} `{value}`")]
    UnknownVariant {
        /// Field being read.
        field: &'static str,
        /// Offending text.
        value: String,
    },
    /// Bytes remain after the last record.
    #[error("{0} trailing bytes after last record")]
    TrailingBytes(usize),
    /// Export was requested for an empty record set.
    #[error("no records to export")]
    NothingToExport,
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
