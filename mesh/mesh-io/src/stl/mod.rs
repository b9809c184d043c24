//! STL (Stereolithography) codec.
//!
//! Supports both binary and ASCII STL.
//!
//! # Format Detection
//!
//! [`read_stl`] first tries the binary layout. The stream is binary only if
//! its length is exactly `84 + 50 * n` bytes and the header's facet count
//! equals `n`. Anything else is rewound and decoded as ASCII.
//!
//! # Writing
//!
//! [`write_stl`] encodes a mesh in the variant chosen by [`StlWriteParams`].
//! Both writers are exact: decoding their output gives back a mesh whose
//! floats have identical bit patterns.

mod ascii;
mod binary;
mod detect;

use std::io::Write;

use mesh_types::Mesh;

use crate::error::IoResult;

pub use ascii::{read_ascii, write_ascii};
pub use binary::{BinaryRead, Mismatch, read_binary, to_binary_bytes, write_binary};
pub use detect::{Detected, read_stl, read_stl_detailed};

/// Size of the free-form header text in binary STL.
pub const HEADER_TEXT_SIZE: usize = 80;

/// Header text plus the 32-bit facet count.
pub const HEADER_SIZE: usize = HEADER_TEXT_SIZE + 4;

/// Size of one facet record (normal + 3 vertices + attribute).
pub const FACET_SIZE: usize = 50;

/// Default header text for binary output and solid name for ASCII output.
pub const DEFAULT_HEADER: &str = "Binary STL generated by mesh-io";

/// STL variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StlFormat {
    /// Fixed-size little-endian records.
    #[default]
    Binary,
    /// Line-oriented text.
    Ascii,
}

impl std::fmt::Display for StlFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Binary => "binary",
            Self::Ascii => "ASCII",
        })
    }
}

/// Parameters for writing STL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StlWriteParams {
    /// Output variant.
    ///
    /// Default: [`StlFormat::Binary`]
    pub format: StlFormat,

    /// Binary header text, or the solid name for ASCII.
    ///
    /// Binary headers are zero padded or truncated to 80 bytes.
    /// Default: [`DEFAULT_HEADER`]
    pub header: String,
}

impl Default for StlWriteParams {
    fn default() -> Self {
        Self {
            format: StlFormat::Binary,
            header: DEFAULT_HEADER.to_string(),
        }
    }
}

impl StlWriteParams {
    /// Create params for ASCII output.
    #[must_use]
    pub fn ascii() -> Self {
        Self {
            format: StlFormat::Ascii,
            header: "mesh".to_string(),
        }
    }

    /// Replace the header text (binary) or solid name (ASCII).
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }
}

/// Encode a mesh in the variant chosen by `params`.
///
/// # Errors
///
/// Returns an error if writing fails, or if a binary mesh has more than
/// `u32::MAX` facets.
pub fn write_stl<W: Write + ?Sized>(
    mesh: &Mesh,
    params: &StlWriteParams,
    writer: &mut W,
) -> IoResult<()> {
    match params.format {
        StlFormat::Binary => write_binary(mesh, &params.header, writer),
        StlFormat::Ascii => write_ascii(mesh, &params.header, writer),
    }
}
