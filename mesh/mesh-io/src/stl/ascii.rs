//! ASCII STL reader and writer.
//!
//! ```text
//! solid name
//!   facet normal ni nj nk
//!     outer loop
//!       vertex v1x v1y v1z
//!       vertex v2x v2y v2z
//!       vertex v3x v3y v3z
//!     endloop
//!   endfacet
//!   ...
//! endsolid name
//! ```
//!
//! The reader is positional rather than keyword driven: each facet is
//! exactly seven lines, and only the `endsolid` sentinel is recognized.
//! Keywords such as `outer loop` are consumed without being checked.

use std::io::{BufRead, ErrorKind, Write};

use mesh_types::{Facet, Mesh, Vertex};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// Sentinel that ends the facet list.
const END_SOLID: &str = "endsolid";

/// Token separators. Other Unicode whitespace is part of a token.
const SEPARATORS: [char; 4] = [' ', '\t', '\n', '\r'];

/// Decode an ASCII STL stream.
///
/// The first line (`solid ...`) is discarded. Facet blocks are then read
/// until a line starting with `endsolid` or the end of the stream between
/// two blocks. Leading whitespace before `endsolid` is ignored.
///
/// Lines may end in `\n`, `\r\n` or a lone `\r`.
///
/// # Errors
///
/// Returns [`IoError::MalformedAscii`] if a coordinate is missing or not a
/// number, a line is not valid UTF-8, or the stream ends inside a facet
/// block. Returns [`IoError::Io`] if the stream cannot be read.
///
/// # Example
///
/// ```
/// use mesh_io::read_ascii;
/// use mesh_types::MeshTopology;
///
/// let text = b"solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid t\n";
/// let mesh = read_ascii(&text[..]).unwrap();
/// assert_eq!(mesh.face_count(), 1);
/// ```
pub fn read_ascii<R: BufRead>(reader: R) -> IoResult<Mesh> {
    let mut lines = Lines::new(reader);
    lines.advance()?;

    let mut facets = Vec::new();
    while let Some((number, line)) = lines.next_line()? {
        if line.trim_start().starts_with(END_SOLID) {
            break;
        }
        let normal = parse_vertex(line, 2, number)?;

        lines.skip("outer loop")?;
        let v1 = lines.require_vertex()?;
        let v2 = lines.require_vertex()?;
        let v3 = lines.require_vertex()?;
        lines.skip("endloop")?;
        lines.skip("endfacet")?;

        facets.push(Facet::new(normal, v1, v2, v3));
    }

    debug!(facets = facets.len(), "decoded ASCII STL");
    Ok(Mesh::from_facets(facets))
}

/// Line source that tracks the current 1-based line number.
///
/// Lines are only decoded as UTF-8 when their tokens are needed, so the
/// skipped header and keyword lines may hold arbitrary bytes.
struct Lines<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    const fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
        }
    }

    /// Load the next raw line into the buffer; `false` at end of stream.
    ///
    /// A line ends at `\n`, `\r` or `\r\n`.
    fn advance(&mut self) -> IoResult<bool> {
        self.buf.clear();
        let mut found = false;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            if available.is_empty() {
                break;
            }
            found = true;
            if let Some(i) = available.iter().position(|&b| b == b'\n' || b == b'\r') {
                let terminator = available[i];
                self.buf.extend_from_slice(&available[..i]);
                self.reader.consume(i + 1);
                if terminator == b'\r' {
                    self.skip_lf()?;
                }
                break;
            }
            let n = available.len();
            self.buf.extend_from_slice(available);
            self.reader.consume(n);
        }
        if found {
            self.line += 1;
        }
        Ok(found)
    }

    /// Consume the `\n` of a `\r\n` pair, if present.
    fn skip_lf(&mut self) -> IoResult<()> {
        loop {
            match self.reader.fill_buf() {
                Ok(available) => {
                    if available.first() == Some(&b'\n') {
                        self.reader.consume(1);
                    }
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Next line number and text without its terminator, or `None` at end
    /// of stream.
    fn next_line(&mut self) -> IoResult<Option<(usize, &str)>> {
        if !self.advance()? {
            return Ok(None);
        }
        let number = self.line;
        std::str::from_utf8(&self.buf)
            .map(|text| Some((number, text)))
            .map_err(|_| IoError::malformed(number, "line is not valid UTF-8"))
    }

    /// Consume a line inside a facet block without looking at it.
    fn skip(&mut self, expected: &str) -> IoResult<()> {
        let number = self.line + 1;
        if self.advance()? {
            Ok(())
        } else {
            Err(unexpected_end(number, expected))
        }
    }

    fn require_vertex(&mut self) -> IoResult<Vertex> {
        let number = self.line + 1;
        match self.next_line()? {
            Some((number, line)) => parse_vertex(line, 1, number),
            None => Err(unexpected_end(number, "vertex")),
        }
    }
}

fn unexpected_end(line: usize, expected: &str) -> IoError {
    IoError::malformed(line, format!("unexpected end of input, expected `{expected}`"))
}

/// Skip `skip` tokens, then parse the next three as `x y z`.
fn parse_vertex(line: &str, skip: usize, line_number: usize) -> IoResult<Vertex> {
    let mut tokens = line.split(SEPARATORS).filter(|t| !t.is_empty()).skip(skip);
    let mut coord = || -> IoResult<f32> {
        let token = tokens
            .next()
            .ok_or_else(|| IoError::malformed(line_number, "expected 3 coordinates"))?;
        token
            .parse::<f32>()
            .map_err(|e| IoError::malformed(line_number, format!("invalid number `{token}`: {e}")))
    };
    let x = coord()?;
    let y = coord()?;
    let z = coord()?;
    Ok(Vertex::new(x, y, z))
}

/// Encode a mesh as ASCII STL.
///
/// Floats use the shortest representation that parses back to the same
/// bits, so [`read_ascii`] reproduces the mesh exactly.
///
/// # Errors
///
/// Returns [`IoError::Io`] if writing fails.
pub fn write_ascii<W: Write + ?Sized>(mesh: &Mesh, name: &str, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "solid {name}")?;

    for facet in mesh.facets() {
        let n = facet.normal();
        writeln!(writer, "  facet normal {:e} {:e} {:e}", n.x(), n.y(), n.z())?;
        writeln!(writer, "    outer loop")?;
        for v in facet.corners() {
            writeln!(writer, "      vertex {:e} {:e} {:e}", v.x(), v.y(), v.z())?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }

    writeln!(writer, "endsolid {name}")?;
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::unnecessary_raw_string_hashes
)]
mod tests {
    use super::*;
    use mesh_types::MeshTopology;

    fn parse(text: &str) -> IoResult<Mesh> {
        read_ascii(text.as_bytes())
    }

    fn malformed_line(result: IoResult<Mesh>) -> usize {
        match result {
            Err(IoError::MalformedAscii { line, .. }) => line,
            other => panic!("expected MalformedAscii, got {other:?}"),
        }
    }

    #[test]
    fn ascii_stl_parsing() {
        let mesh = parse(
            r#"solid test
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 1 0
    endloop
  endfacet
endsolid test"#,
        )
        .unwrap();

        assert_eq!(mesh.face_count(), 1);
        let f = mesh.facets()[0];
        assert_eq!(f.normal(), Vertex::new(0.0, 0.0, 1.0));
        assert_eq!(
            f.corners(),
            [
                Vertex::new(0.0, 0.0, 0.0),
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(0.0, 1.0, 0.0)
            ]
        );
    }

    #[test]
    fn crlf_and_tabs_are_separators() {
        let text = "solid t\r\nfacet\tnormal 1e0\t-2.5 +3\r\nouter loop\r\nvertex 1 2 3\r\n\tvertex\t4 5 6\r\nvertex 7 8 9\r\nendloop\r\nendfacet\r\nendsolid t\r\n";
        let mesh = parse(text).unwrap();
        let f = mesh.facets()[0];
        assert_eq!(f.normal(), Vertex::new(1.0, -2.5, 3.0));
        assert_eq!(f.v2(), Vertex::new(4.0, 5.0, 6.0));
        assert_eq!(f.v3(), Vertex::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn bare_cr_ends_lines() {
        let text = "solid t\rfacet normal 0 0 1\router loop\rvertex 0 0 0\rvertex 1 0 0\rvertex 0 1 0\rendloop\rendfacet\rendsolid t\r";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.facets()[0].v2(), Vertex::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn line_numbers_count_each_terminator_style() {
        // LF, CR and CRLF each end exactly one line.
        let text = "solid t\nfacet normal 0 0 1\router loop\r\nvertex 0 0 0\nvertex 1 bad 0\n";
        assert_eq!(malformed_line(parse(text)), 5);
    }

    #[test]
    fn keywords_are_not_checked() {
        let text = "anything\nx y 1 2 3\n...\na 1 1 1\nb 2 2 2\nc 3 3 3\n.\n.\nendsolid\n";
        let mesh = parse(text).unwrap();
        assert_eq!(mesh.facets()[0].normal(), Vertex::new(1.0, 2.0, 3.0));
        assert_eq!(mesh.facets()[0].v3(), Vertex::new(3.0, 3.0, 3.0));
    }

    #[test]
    fn indented_endsolid_ends_the_list() {
        let mesh = parse("solid t\n   endsolid t\ngarbage that is never read\n").unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn end_of_stream_between_blocks_is_accepted() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("solid only-a-header\n").unwrap().is_empty());

        let mesh = parse(
            "solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\nendfacet\n",
        )
        .unwrap();
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn end_of_stream_inside_block_is_malformed() {
        let text = "solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\n";
        assert_eq!(malformed_line(parse(text)), 5);

        let text = "solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 0 0\nvertex 0 1 0\nendloop\n";
        assert_eq!(malformed_line(parse(text)), 8);
    }

    #[test]
    fn non_numeric_vertex_is_malformed() {
        let text = "solid t\nfacet normal 0 0 1\nouter loop\nvertex 0 0 0\nvertex 1 abc 0\nvertex 0 1 0\nendloop\nendfacet\nendsolid t\n";
        let err = parse(text).unwrap_err();
        assert!(err.is_malformed_ascii());
        assert!(err.to_string().contains("`abc`"));
        assert!(err.to_string().contains("line 5"));
    }

    #[test]
    fn missing_coordinate_is_malformed() {
        let text = "solid t\nfacet normal 0 0\n";
        assert_eq!(malformed_line(parse(text)), 2);
    }

    #[test]
    fn blank_line_where_facet_expected_is_malformed() {
        let text = "solid t\n\nendsolid t\n";
        assert_eq!(malformed_line(parse(text)), 2);
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let bytes = b"solid t\nfacet normal \xFF 0 0\n";
        let err = read_ascii(&bytes[..]).unwrap_err();
        assert!(err.is_malformed_ascii());
    }

    #[test]
    fn vertex_lines_are_three_per_facet() {
        let mut text = String::from("solid many\n");
        for i in 0..7 {
            text.push_str(&format!(
                "facet normal 0 0 1\nouter loop\nvertex {i} 0 0\nvertex {i} 1 0\nvertex {i} 0 1\nendloop\nendfacet\n"
            ));
        }
        text.push_str("endsolid many\n");

        let vertex_lines = text.lines().filter(|l| l.starts_with("vertex")).count();
        let mesh = parse(&text).unwrap();
        assert_eq!(vertex_lines, 3 * mesh.face_count());
        assert_eq!(mesh.vertex_count(), vertex_lines);
    }

    #[test]
    fn writer_output_reads_back_exactly() {
        let mesh = Mesh::from_facets(vec![Facet::new(
            Vertex::new(0.0, -0.0, 1.0),
            Vertex::new(0.1, 1e-38, -3.4e38),
            Vertex::new(f32::MIN_POSITIVE / 4.0, 123_456.79, 1.0 / 3.0),
            Vertex::new(f32::INFINITY, f32::NEG_INFINITY, 7.0),
        )]);

        let mut out = Vec::new();
        write_ascii(&mesh, "exact", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("solid exact\n"));
        assert!(text.ends_with("endsolid exact\n"));

        assert_eq!(parse(&text).unwrap(), mesh);
    }
}
