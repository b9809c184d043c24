//! Little-endian IEEE-754 single-precision codec.
//!
//! STL stores every coordinate as 4 little-endian bytes. Decoding assembles
//! the bytes into a `u32` and reinterprets its bits; it never converts the
//! integer's numeric value, so every pattern (NaN payloads, subnormals,
//! negative zero) comes back unchanged.

use std::io::{self, Read, Write};

use mesh_types::Vertex;

/// Bytes per encoded vertex (3 x f32).
const VERTEX_SIZE: usize = 12;

/// Decode one float from 4 little-endian bytes.
///
/// # Example
///
/// ```
/// use mesh_io::decode_f32;
///
/// assert_eq!(decode_f32([0x00, 0x00, 0x80, 0x3F]).to_bits(), 1.0f32.to_bits());
/// ```
#[inline]
#[must_use]
#[allow(clippy::cast_lossless)] // u32::from is not const
pub const fn decode_f32(bytes: [u8; 4]) -> f32 {
    let bits = (bytes[0] as u32)
        | ((bytes[1] as u32) << 8)
        | ((bytes[2] as u32) << 16)
        | ((bytes[3] as u32) << 24);
    f32::from_bits(bits)
}

/// Encode one float as 4 little-endian bytes, the inverse of [`decode_f32`].
#[inline]
#[must_use]
pub const fn encode_f32(value: f32) -> [u8; 4] {
    value.to_bits().to_le_bytes()
}

/// Decode a vertex from 12 bytes (x, y, z).
#[inline]
fn decode_vertex(buf: &[u8; VERTEX_SIZE]) -> Vertex {
    Vertex::new(
        decode_f32([buf[0], buf[1], buf[2], buf[3]]),
        decode_f32([buf[4], buf[5], buf[6], buf[7]]),
        decode_f32([buf[8], buf[9], buf[10], buf[11]]),
    )
}

/// Read one vertex from a stream.
///
/// Running out of bytes surfaces as `UnexpectedEof`.
pub(crate) fn read_vertex<R: Read + ?Sized>(reader: &mut R) -> io::Result<Vertex> {
    let mut buf = [0u8; VERTEX_SIZE];
    reader.read_exact(&mut buf)?;
    Ok(decode_vertex(&buf))
}

/// Write one vertex as 3 little-endian floats.
pub(crate) fn write_vertex<W: Write + ?Sized>(writer: &mut W, vertex: Vertex) -> io::Result<()> {
    writer.write_all(&encode_f32(vertex.x()))?;
    writer.write_all(&encode_f32(vertex.y()))?;
    writer.write_all(&encode_f32(vertex.z()))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn decodes_known_patterns() {
        assert_eq!(decode_f32([0, 0, 0, 0]), 0.0);
        assert_eq!(decode_f32([0x00, 0x00, 0x80, 0x3F]), 1.0);
        assert_eq!(decode_f32([0x00, 0x00, 0x20, 0xC1]), -10.0);
        assert_eq!(decode_f32([0x00, 0x00, 0x80, 0x7F]), f32::INFINITY);
    }

    #[test]
    fn keeps_special_bit_patterns() {
        // Negative zero, smallest subnormal and a NaN with a payload.
        for bits in [0x8000_0000u32, 0x0000_0001, 0x7FC0_1234, 0xFFC0_0001] {
            let value = decode_f32(bits.to_le_bytes());
            assert_eq!(value.to_bits(), bits);
            assert_eq!(encode_f32(value), bits.to_le_bytes());
        }
    }

    #[test]
    fn reinterprets_instead_of_converting() {
        // 1065353216 as a number is far from 1.0; as bits it is exactly 1.0.
        assert_eq!(decode_f32(1_065_353_216u32.to_le_bytes()), 1.0);
    }

    #[test]
    fn vertex_stream_roundtrip() {
        let v = Vertex::new(1.5, -2.25, f32::MIN_POSITIVE);
        let mut bytes = Vec::new();
        write_vertex(&mut bytes, v).unwrap();
        assert_eq!(bytes.len(), VERTEX_SIZE);
        assert_eq!(read_vertex(&mut bytes.as_slice()).unwrap(), v);
    }

    #[test]
    fn short_vertex_is_unexpected_eof() {
        let err = read_vertex(&mut [0u8; 11].as_slice()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
