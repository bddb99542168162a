//! Error types for EWF segment access

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::types::{AccessFlags, SegmentFormat};

/// Result type alias for EWF operations
pub type Result<T> = std::result::Result<T, EwfError>;

#[derive(Debug, Error)]
pub enum EwfError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid file signature in {}", .path.display())]
    InvalidSignature { path: PathBuf },

    #[error("Invalid segment file header in {}: {reason}", .path.display())]
    InvalidHeader { path: PathBuf, reason: String },

    #[error("Unsupported access flags: {0}")]
    UnsupportedAccessFlags(AccessFlags),

    #[error("Handle is already open")]
    AlreadyOpen,

    #[error("Handle is not open")]
    NotOpen,

    #[error("Mixed segment formats: {expected} and {found} in {}", .path.display())]
    MixedFormats {
        expected: SegmentFormat,
        found: SegmentFormat,
        path: PathBuf,
    },

    #[error("Duplicate segment number {number} in {}", .path.display())]
    DuplicateSegment { number: u32, path: PathBuf },

    #[error("Missing segment file number {0}")]
    MissingSegment(u32),

    #[error("Segment set identifier mismatch in {}", .path.display())]
    SetIdentifierMismatch { path: PathBuf },

    #[error("Unsupported segment file extension: {0}")]
    UnsupportedExtension(String),

    #[error("Segment number {0} exceeds the extension naming range")]
    TooManySegments(u32),
}

impl EwfError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EwfError::Io {
            path: path.into(),
            source,
        }
    }
}
