//! Property-based tests for the STL codec.
//!
//! Run with: cargo test -p mesh-io -- proptest

#![allow(clippy::unwrap_used)]

use std::io::Cursor;

use mesh_io::{StlFormat, read_ascii, read_stl_detailed, to_binary_bytes, write_ascii};
use mesh_types::{Facet, Mesh, MeshTopology, Vertex};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Any `f32` bit pattern, NaN payloads and signed zeros included.
fn arb_bits_f32() -> impl Strategy<Value = f32> + Clone {
    any::<u32>().prop_map(f32::from_bits)
}

/// Any `f32` that survives a text round trip.
fn arb_text_f32() -> impl Strategy<Value = f32> + Clone {
    arb_bits_f32().prop_filter("NaN has no exact text form", |f| !f.is_nan())
}

fn arb_vertex(coord: impl Strategy<Value = f32> + Clone) -> impl Strategy<Value = Vertex> + Clone {
    (coord.clone(), coord.clone(), coord).prop_map(|(x, y, z)| Vertex::new(x, y, z))
}

fn arb_mesh(
    coord: impl Strategy<Value = f32> + Clone,
    max_facets: usize,
) -> impl Strategy<Value = Mesh> {
    let vertex = arb_vertex(coord);
    let facet = (vertex.clone(), vertex.clone(), vertex.clone(), vertex)
        .prop_map(|(n, a, b, c)| Facet::new(n, a, b, c));
    prop::collection::vec(facet, 0..=max_facets).prop_map(Mesh::from_facets)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_binary_roundtrip_preserves_bits(mesh in arb_mesh(arb_bits_f32(), 16)) {
        let bytes = to_binary_bytes(&mesh, "proptest").unwrap();
        prop_assert_eq!(bytes.len(), 84 + 50 * mesh.face_count());

        let detected = read_stl_detailed(&mut Cursor::new(bytes)).unwrap();
        prop_assert_eq!(detected.format, StlFormat::Binary);
        // Vertex equality compares bit patterns, so NaN payloads count.
        prop_assert_eq!(detected.mesh, mesh);
    }

    #[test]
    fn proptest_ascii_roundtrip_is_exact(mesh in arb_mesh(arb_text_f32(), 8)) {
        let mut out = Vec::new();
        write_ascii(&mesh, "proptest", &mut out).unwrap();
        let decoded = read_ascii(out.as_slice()).unwrap();
        prop_assert_eq!(decoded, mesh);
    }

    #[test]
    fn proptest_vertex_count_is_three_per_facet(mesh in arb_mesh(arb_bits_f32(), 16)) {
        prop_assert_eq!(mesh.vertex_count(), 3 * mesh.face_count());
        prop_assert_eq!(mesh.vertices().len(), mesh.vertex_count());
        prop_assert_eq!(mesh.flattened_vertices().len(), mesh.vertex_count());
    }

    #[test]
    fn proptest_unaligned_lengths_never_decode_as_binary(
        mesh in arb_mesh(arb_bits_f32(), 4),
        cut in 1usize..50,
    ) {
        let mut bytes = to_binary_bytes(&mesh, "").unwrap();
        bytes.truncate(bytes.len().saturating_sub(cut).max(84));
        prop_assume!((bytes.len() - 84) % 50 != 0);

        // Whatever the fallback makes of it, it is never reported as binary.
        if let Ok(detected) = read_stl_detailed(&mut Cursor::new(bytes)) {
            prop_assert_eq!(detected.format, StlFormat::Ascii);
        }
    }
}
