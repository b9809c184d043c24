//! Benchmarks for the STL codec.
//!
//! Run with: cargo bench -p mesh-io
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-io -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-io -- --baseline main

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_precision_loss)]

use std::io::Cursor;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_io::{read_ascii, read_stl, to_binary_bytes, write_ascii};
use mesh_types::{Facet, Mesh, Vertex};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// A flat `n` x `n` grid of quads, two facets per quad.
fn create_grid(n: u32) -> Mesh {
    let up = Vertex::new(0.0, 0.0, 1.0);
    let mut facets = Vec::with_capacity((2 * n * n) as usize);
    for i in 0..n {
        for j in 0..n {
            let (x0, y0) = (i as f32, j as f32);
            let (x1, y1) = (x0 + 1.0, y0 + 1.0);
            let a = Vertex::new(x0, y0, 0.0);
            let b = Vertex::new(x1, y0, 0.0);
            let c = Vertex::new(x1, y1, 0.0);
            let d = Vertex::new(x0, y1, 0.0);
            facets.push(Facet::new(up, a, b, c));
            facets.push(Facet::new(up, a, c, d));
        }
    }
    Mesh::from_facets(facets)
}

// =============================================================================
// STL Benchmarks
// =============================================================================

fn bench_stl(c: &mut Criterion) {
    let mut group = c.benchmark_group("STL");

    let grid = create_grid(50); // 5k facets
    let binary = to_binary_bytes(&grid, "bench").expect("failed to encode binary");
    let mut ascii = Vec::new();
    write_ascii(&grid, "bench", &mut ascii).expect("failed to encode ASCII");

    group.throughput(Throughput::Elements(grid.facets().len() as u64));

    group.bench_function("decode_binary", |b| {
        b.iter(|| read_stl(&mut Cursor::new(black_box(binary.as_slice()))));
    });

    // Goes through detection, so includes the rejected binary attempt.
    group.bench_function("decode_ascii_detected", |b| {
        b.iter(|| read_stl(&mut Cursor::new(black_box(ascii.as_slice()))));
    });

    group.bench_function("decode_ascii_direct", |b| {
        b.iter(|| read_ascii(black_box(ascii.as_slice())));
    });

    group.bench_function("encode_binary", |b| {
        b.iter(|| to_binary_bytes(black_box(&grid), "bench"));
    });

    group.bench_function("encode_ascii", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(ascii.len());
            write_ascii(black_box(&grid), "bench", &mut out).map(|()| out)
        });
    });

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_stl);
criterion_main!(benches);
