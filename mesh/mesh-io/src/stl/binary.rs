//! Binary STL reader and writer.
//!
//! ```text
//! UINT8[80]    – Header (ignored on read)
//! UINT32       – Number of triangles
//! foreach triangle
//!     REAL32[3] – Normal vector
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (discarded, written as 0)
//! end
//! ```

use std::io::{Read, Seek, SeekFrom, Write};

use mesh_types::{Facet, Mesh};
use tracing::{debug, warn};

use super::{FACET_SIZE, HEADER_SIZE, HEADER_TEXT_SIZE};
use crate::error::{IoError, IoResult};
use crate::float::{read_vertex, write_vertex};

/// Why a stream was rejected as binary STL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// The stream is shorter than the 84-byte header.
    TooShort {
        /// Total stream length in bytes.
        len: u64,
    },
    /// The bytes after the header are not a whole number of facet records.
    UnalignedContent {
        /// Bytes after the 84-byte header.
        content_size: u64,
    },
    /// The header's facet count disagrees with the stream length.
    CountMismatch {
        /// Facet count stored in the header.
        declared: u32,
        /// Facet count implied by the stream length.
        computed: u64,
    },
}

impl std::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooShort { len } => {
                write!(f, "{len} bytes is shorter than the {HEADER_SIZE}-byte header")
            }
            Self::UnalignedContent { content_size } => write!(
                f,
                "{content_size} content bytes is not a multiple of {FACET_SIZE}"
            ),
            Self::CountMismatch { declared, computed } => write!(
                f,
                "header declares {declared} facets but the length implies {computed}"
            ),
        }
    }
}

/// Outcome of a binary decode attempt.
///
/// A mismatch is an expected outcome, not an error: the caller decides
/// whether to try another decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryRead {
    /// The stream is binary STL and decoded completely.
    Decoded(Mesh),
    /// The stream failed a structural check.
    Mismatch(Mismatch),
}

/// Decode a binary STL stream from its current position.
///
/// The length of the remaining data is measured by seeking to the end and
/// back. A length that is not `84 + 50 * n`, or a header count other than
/// `n`, yields [`BinaryRead::Mismatch`]. Otherwise the `n` facets are decoded
/// in order.
///
/// On a length mismatch the stream is left where it was. A count mismatch
/// leaves it just past the header.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the stream cannot be seeked or read.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use mesh_io::{BinaryRead, read_binary};
///
/// let mut stream = Cursor::new(vec![0u8; 84]);
/// let result = read_binary(&mut stream).unwrap();
/// assert!(matches!(result, BinaryRead::Decoded(mesh) if mesh.facets().is_empty()));
/// ```
pub fn read_binary<R: Read + Seek + ?Sized>(reader: &mut R) -> IoResult<BinaryRead> {
    let len = remaining_len(reader)?;

    let Some(content_size) = len.checked_sub(HEADER_SIZE as u64) else {
        return Ok(BinaryRead::Mismatch(Mismatch::TooShort { len }));
    };
    if content_size % FACET_SIZE as u64 != 0 {
        return Ok(BinaryRead::Mismatch(Mismatch::UnalignedContent {
            content_size,
        }));
    }
    let computed = content_size / FACET_SIZE as u64;

    let mut header = [0u8; HEADER_TEXT_SIZE];
    reader.read_exact(&mut header)?;

    let mut count = [0u8; 4];
    reader.read_exact(&mut count)?;
    let declared = u32::from_le_bytes(count);
    if u64::from(declared) != computed {
        return Ok(BinaryRead::Mismatch(Mismatch::CountMismatch {
            declared,
            computed,
        }));
    }

    // The count matched the stream length, so the allocation is bounded by it.
    #[allow(clippy::cast_possible_truncation)]
    let mut facets = Vec::with_capacity(declared as usize);
    for _ in 0..declared {
        facets.push(read_facet(reader)?);
    }

    debug!(facets = facets.len(), "decoded binary STL");
    Ok(BinaryRead::Decoded(Mesh::from_facets(facets)))
}

/// Bytes between the current position and the end of the stream. The
/// position is restored afterwards.
fn remaining_len<R: Seek + ?Sized>(reader: &mut R) -> IoResult<u64> {
    let start = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    let len = end.saturating_sub(start);
    let back = i64::try_from(len)
        .map_err(|_| std::io::Error::other("stream too long to measure"))?;
    reader.seek_relative(-back)?;
    Ok(len)
}

/// Read one 50-byte facet record; the 2 attribute bytes are dropped.
fn read_facet<R: Read + ?Sized>(reader: &mut R) -> std::io::Result<Facet> {
    let normal = read_vertex(reader)?;
    let v1 = read_vertex(reader)?;
    let v2 = read_vertex(reader)?;
    let v3 = read_vertex(reader)?;
    let mut attribute = [0u8; 2];
    reader.read_exact(&mut attribute)?;
    Ok(Facet::new(normal, v1, v2, v3))
}

/// Encode a mesh as binary STL.
///
/// `header` is copied into the 80-byte header, zero padded or truncated.
/// Facet normals are written as stored and every attribute field is zero.
///
/// # Errors
///
/// Returns [`IoError::TooManyFacets`] before writing anything if the facet
/// count does not fit in 32 bits, or [`IoError::Io`] if writing fails.
pub fn write_binary<W: Write + ?Sized>(mesh: &Mesh, header: &str, writer: &mut W) -> IoResult<()> {
    let facets = mesh.facets();
    let count = u32::try_from(facets.len()).map_err(|_| IoError::TooManyFacets {
        count: facets.len(),
    })?;

    writer.write_all(&header_bytes(header))?;
    writer.write_all(&count.to_le_bytes())?;

    for facet in facets {
        write_vertex(writer, facet.normal())?;
        for corner in facet.corners() {
            write_vertex(writer, corner)?;
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }

    Ok(())
}

/// Encode a mesh as an in-memory binary STL buffer.
///
/// # Errors
///
/// Returns [`IoError::TooManyFacets`] if the mesh has more than `u32::MAX`
/// facets.
pub fn to_binary_bytes(mesh: &Mesh, header: &str) -> IoResult<Vec<u8>> {
    let mut bytes = Vec::with_capacity(HEADER_SIZE + mesh.facets().len() * FACET_SIZE);
    write_binary(mesh, header, &mut bytes)?;
    Ok(bytes)
}

fn header_bytes(text: &str) -> [u8; HEADER_TEXT_SIZE] {
    let mut header = [0u8; HEADER_TEXT_SIZE];
    let text = text.as_bytes();
    if text.len() > HEADER_TEXT_SIZE {
        warn!(
            len = text.len(),
            "STL header text longer than {HEADER_TEXT_SIZE} bytes, truncating"
        );
    }
    let n = text.len().min(HEADER_TEXT_SIZE);
    header[..n].copy_from_slice(&text[..n]);
    header
}
