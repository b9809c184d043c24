//! Error types for STL I/O operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for STL I/O operations.
pub type IoResult<T> = Result<T, IoError>;

/// Errors that can occur while decoding, encoding or exporting a mesh.
///
/// A binary layout mismatch is not an error: it is reported as
/// [`BinaryRead::Mismatch`](crate::BinaryRead::Mismatch) and makes the
/// detector fall back to the ASCII reader.
#[derive(Debug, Error)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// ASCII STL content that cannot be decoded.
    #[error("malformed ASCII STL at line {line}: {message}")]
    MalformedAscii {
        /// 1-based line number where decoding stopped.
        line: usize,
        /// Description of what was wrong.
        message: String,
    },

    /// Mesh too large for the 32-bit facet count of binary STL.
    #[error("mesh has {count} facets, binary STL allows at most {}", u32::MAX)]
    TooManyFacets {
        /// Number of facets in the mesh.
        count: usize,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IoError {
    /// Create a `MalformedAscii` error for the given line.
    #[must_use]
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedAscii {
            line,
            message: message.into(),
        }
    }

    /// Check whether this error came from malformed ASCII content.
    #[must_use]
    pub const fn is_malformed_ascii(&self) -> bool {
        matches!(self, Self::MalformedAscii { .. })
    }
}
