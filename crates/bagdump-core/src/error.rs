//! Error types for the bagdump-core library.
//!
//! This module provides comprehensive error handling using the `thiserror` crate,
//! with detailed error variants for different failure modes.
//!
//! Every structural error carries the byte offset (within the decompressed
//! database, or within the input file for extraction errors) at which it was
//! detected. The format has no self-describing versioning, so any structural
//! anomaly means "wrong format, wrong build, or corrupt input" and is terminal
//! for the run; nothing is recovered or skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bagdump operations
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all bagdump operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Failed to read input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        /// Path to the file that failed to read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Input file ends before the embedded database offset
    #[error("input is {len} bytes, shorter than the database offset {offset:#x}")]
    InputTooShort {
        /// Actual length of the input file
        len: usize,
        /// Offset at which the compressed database was expected
        offset: usize,
    },

    /// The trailing bytes are not a valid zlib stream
    #[error("failed to decompress database payload at offset {offset:#x}: {source}")]
    Decompression {
        /// Offset of the compressed payload within the input file
        offset: usize,
        /// Underlying decoder error
        #[source]
        source: std::io::Error,
    },

    /// A structural expectation of the record format was violated
    #[error("format violation at offset {offset:#x}: {details}")]
    Format {
        /// Byte offset within the decompressed database
        offset: usize,
        /// Detailed description of the violated expectation
        details: String,
    },

    /// A record ended before its declared content could be decoded
    #[error("truncated record at offset {offset:#x}: {details}")]
    TruncatedRecord {
        /// Byte offset within the decompressed database
        offset: usize,
        /// Detailed description of what was missing
        details: String,
    },

    /// An item carries a type tag that is not one of the known three
    #[error("unknown item type tag '{tag}' at offset {offset:#x}")]
    UnknownItemType {
        /// Byte offset of the tag within the decompressed database
        offset: usize,
        /// The offending 3-byte tag, lossily decoded for display
        tag: String,
    },
}

impl Error {
    /// Creates a new file read error
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Creates a new format violation error
    pub fn format(offset: usize, details: impl Into<String>) -> Self {
        Self::Format {
            offset,
            details: details.into(),
        }
    }

    /// Creates a new truncated record error
    pub fn truncated(offset: usize, details: impl Into<String>) -> Self {
        Self::TruncatedRecord {
            offset,
            details: details.into(),
        }
    }

    /// Creates a new unknown item type error from the raw tag bytes
    pub fn unknown_item_type(offset: usize, tag: &[u8]) -> Self {
        Self::UnknownItemType {
            offset,
            tag: String::from_utf8_lossy(tag).into_owned(),
        }
    }

    /// Returns the database byte offset this error was detected at, if any
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::FileRead { .. } => None,
            Self::InputTooShort { .. } => None,
            Self::Decompression { offset, .. }
            | Self::Format { offset, .. }
            | Self::TruncatedRecord { offset, .. }
            | Self::UnknownItemType { offset, .. } => Some(*offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::format(0x48, "correct-answer index 4 out of bounds for 4 answers");
        assert!(err.to_string().contains("0x48"));
        assert!(err.to_string().contains("out of bounds"));
    }

    #[test]
    fn test_unknown_item_type_carries_tag() {
        let err = Error::unknown_item_type(0x100, b"XXX");
        assert!(err.to_string().contains("XXX"));
        assert_eq!(err.offset(), Some(0x100));
    }

    #[test]
    fn test_input_too_short_has_no_offset() {
        let err = Error::InputTooShort {
            len: 12,
            offset: 0x70C10,
        };
        assert_eq!(err.offset(), None);
        assert!(err.to_string().contains("0x70c10"));
    }
}
