//! Core mesh types for the STL codec.
//!
//! This crate provides the value types every STL reader and writer shares:
//!
//! - [`Vertex`] - Three single-precision coordinates
//! - [`Facet`] - One triangle: a normal plus three corners
//! - [`Mesh`] - An ordered, immutable sequence of facets
//! - [`Aabb`] - Axis-aligned bounding box over the corners of a mesh
//!
//! # Layer 0 Crate
//!
//! This crate has no I/O and no format logic. Decoding and encoding live in
//! `mesh-io`.
//!
//! # Precision
//!
//! Coordinates are stored as `f32`, which is exactly what STL carries. Values
//! are never widened or rounded on their way through the codec, and
//! [`Vertex`] equality compares bit patterns.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Facet, Mesh, MeshTopology, Vertex};
//!
//! let facet = Facet::new(
//!     Vertex::new(0.0, 0.0, 1.0),
//!     Vertex::new(0.0, 0.0, 0.0),
//!     Vertex::new(1.0, 0.0, 0.0),
//!     Vertex::new(0.0, 1.0, 0.0),
//! );
//! let mesh = Mesh::from_facets(vec![facet]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert_eq!(mesh.vertex_count(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod facet;
mod mesh;
mod traits;
mod vertex;

pub use bounds::Aabb;
pub use facet::Facet;
pub use mesh::Mesh;
pub use traits::MeshTopology;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
