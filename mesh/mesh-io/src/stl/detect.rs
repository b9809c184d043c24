//! Binary-or-ASCII detection.
//!
//! Detection runs as a small state machine:
//!
//! ```text
//! Unparsed -> TryBinary -> Decoded
//!                  |
//!               (mismatch, rewind)
//!                  v
//!              TryAscii  -> Decoded | Failed
//! ```
//!
//! A binary mismatch is the only transition that leads to another attempt.
//! I/O errors and malformed ASCII end the run immediately.
//!
//! The binary check (length and header count) can accept an ASCII file whose
//! length happens to be `84 + 50 * n` and whose bytes 80..84 read as `n`.
//! Such inputs are decoded as binary.

use std::io::{BufReader, Read, Seek, SeekFrom};

use mesh_types::Mesh;
use tracing::debug;

use super::StlFormat;
use super::ascii::read_ascii;
use super::binary::{BinaryRead, read_binary};
use crate::error::{IoError, IoResult};

/// A decoded mesh together with the variant it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detected {
    /// The decoded mesh.
    pub mesh: Mesh,
    /// Which STL variant matched.
    pub format: StlFormat,
}

enum Stage {
    Unparsed,
    TryBinary,
    TryAscii,
    Decoded(Detected),
    Failed(IoError),
}

/// Decode an STL stream of either variant.
///
/// The stream must hold the STL data from offset 0. It is borrowed, never
/// closed, and is rewound at most once.
///
/// An ASCII file whose length is `84 + 50 * n` and whose bytes 80..84 encode
/// `n` as a little-endian `u32` passes the binary check and is decoded as
/// binary.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the stream cannot be read or rewound, or
/// [`IoError::MalformedAscii`] if it is neither valid binary nor valid ASCII
/// STL.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use mesh_io::{StlFormat, read_stl_detailed};
///
/// let text = "solid x\nendsolid x\n";
/// let detected = read_stl_detailed(&mut Cursor::new(text)).unwrap();
/// assert_eq!(detected.format, StlFormat::Ascii);
/// ```
pub fn read_stl_detailed<R: Read + Seek + ?Sized>(reader: &mut R) -> IoResult<Detected> {
    let mut stage = Stage::Unparsed;
    loop {
        stage = match stage {
            Stage::Unparsed => Stage::TryBinary,
            Stage::TryBinary => try_binary(reader),
            Stage::TryAscii => try_ascii(reader),
            Stage::Decoded(detected) => return Ok(detected),
            Stage::Failed(err) => return Err(err),
        };
    }
}

/// Decode an STL stream of either variant, discarding which one matched.
///
/// # Errors
///
/// See [`read_stl_detailed`].
pub fn read_stl<R: Read + Seek + ?Sized>(reader: &mut R) -> IoResult<Mesh> {
    read_stl_detailed(reader).map(|detected| detected.mesh)
}

fn try_binary<R: Read + Seek + ?Sized>(reader: &mut R) -> Stage {
    match read_binary(reader) {
        Ok(BinaryRead::Decoded(mesh)) => Stage::Decoded(Detected {
            mesh,
            format: StlFormat::Binary,
        }),
        Ok(BinaryRead::Mismatch(reason)) => {
            debug!(%reason, "not binary STL, rewinding for ASCII");
            match reader.seek(SeekFrom::Start(0)) {
                Ok(_) => Stage::TryAscii,
                Err(err) => Stage::Failed(err.into()),
            }
        }
        Err(err) => Stage::Failed(err),
    }
}

fn try_ascii<R: Read + Seek + ?Sized>(reader: &mut R) -> Stage {
    match read_ascii(BufReader::new(reader)) {
        Ok(mesh) => Stage::Decoded(Detected {
            mesh,
            format: StlFormat::Ascii,
        }),
        Err(err) => Stage::Failed(err),
    }
}
