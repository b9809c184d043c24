//! Ordered facet mesh.

use crate::{Aabb, Facet, MeshTopology, Vertex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered sequence of facets, as stored in an STL file.
///
/// A `Mesh` is built once, from a complete list of facets, and is read-only
/// afterwards. Facet order is preserved exactly.
///
/// # Flattened Vertices
///
/// [`Mesh::vertices`] visits the facets in order and yields `v1, v2, v3` of
/// each. Vertices are **not** deduplicated: a corner shared by two facets
/// appears twice, so the sequence always has `3 * facet_count` entries.
///
/// # Example
///
/// ```
/// use mesh_types::{Facet, Mesh, MeshTopology, Vertex};
///
/// let a = Facet::new(
///     Vertex::new(0.0, 0.0, 1.0),
///     Vertex::new(0.0, 0.0, 0.0),
///     Vertex::new(1.0, 0.0, 0.0),
///     Vertex::new(0.0, 1.0, 0.0),
/// );
/// let b = Facet::new(
///     Vertex::new(0.0, 0.0, 1.0),
///     Vertex::new(1.0, 0.0, 0.0),
///     Vertex::new(1.0, 1.0, 0.0),
///     Vertex::new(0.0, 1.0, 0.0),
/// );
///
/// let mesh: Mesh = [a, b].into_iter().collect();
/// assert_eq!(mesh.face_count(), 2);
/// assert_eq!(mesh.vertices().count(), 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mesh {
    facets: Vec<Facet>,
}

impl Mesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { facets: Vec::new() }
    }

    /// Create a mesh that takes ownership of a complete facet list.
    #[inline]
    #[must_use]
    pub const fn from_facets(facets: Vec<Facet>) -> Self {
        Self { facets }
    }

    /// All facets, in file order.
    #[inline]
    #[must_use]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Facet at `index`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn facet(&self, index: usize) -> Option<&Facet> {
        self.facets.get(index)
    }

    /// Iterate over the flattened corner sequence (`v1, v2, v3` per facet).
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = Vertex> + '_ {
        FlattenedVertices {
            facets: &self.facets,
            next: 0,
        }
    }

    /// Collect the flattened corner sequence.
    #[must_use]
    pub fn flattened_vertices(&self) -> Vec<Vertex> {
        self.vertices().collect()
    }

    /// Consume the mesh and return its facets.
    #[inline]
    #[must_use]
    pub fn into_facets(self) -> Vec<Facet> {
        self.facets
    }

    /// Bounding box of all corners.
    ///
    /// Facet normals are not positions and do not contribute.
    /// Returns an empty box for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_vertices(self.vertices())
    }
}

impl MeshTopology for Mesh {
    fn vertex_count(&self) -> usize {
        self.facets.len() * 3
    }

    fn face_count(&self) -> usize {
        self.facets.len()
    }
}

impl FromIterator<Facet> for Mesh {
    fn from_iter<I: IntoIterator<Item = Facet>>(iter: I) -> Self {
        Self::from_facets(iter.into_iter().collect())
    }
}

impl From<Vec<Facet>> for Mesh {
    fn from(facets: Vec<Facet>) -> Self {
        Self::from_facets(facets)
    }
}

/// Iterator behind [`Mesh::vertices`].
struct FlattenedVertices<'a> {
    facets: &'a [Facet],
    next: usize,
}

impl Iterator for FlattenedVertices<'_> {
    type Item = Vertex;

    fn next(&mut self) -> Option<Vertex> {
        let facet = self.facets.get(self.next / 3)?;
        let vertex = facet.corners()[self.next % 3];
        self.next += 1;
        Some(vertex)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.facets.len() * 3 - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for FlattenedVertices<'_> {}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn facet(offset: f32) -> Facet {
        Facet::new(
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(offset, 0.0, 0.0),
            Vertex::new(offset + 1.0, 0.0, 0.0),
            Vertex::new(offset, 1.0, 0.0),
        )
    }

    #[test]
    fn mesh_is_empty() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.vertices().count(), 0);
        assert!(mesh.bounds().is_empty());
    }

    #[test]
    fn flattened_vertices_follow_facet_order() {
        let mesh = Mesh::from_facets(vec![facet(0.0), facet(10.0)]);
        let flat = mesh.flattened_vertices();
        assert_eq!(flat.len(), 6);
        assert_eq!(flat[0], Vertex::new(0.0, 0.0, 0.0));
        assert_eq!(flat[2], Vertex::new(0.0, 1.0, 0.0));
        assert_eq!(flat[3], Vertex::new(10.0, 0.0, 0.0));
        assert_eq!(flat[5], Vertex::new(10.0, 1.0, 0.0));
    }

    #[test]
    fn shared_corners_are_not_deduplicated() {
        let mesh = Mesh::from_facets(vec![facet(0.0), facet(0.0)]);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.vertices().len(), 6);
    }

    #[test]
    fn vertex_iterator_reports_exact_size() {
        let mesh = Mesh::from_facets(vec![facet(0.0), facet(1.0), facet(2.0)]);
        let mut it = mesh.vertices();
        assert_eq!(it.len(), 9);
        it.next();
        it.next();
        assert_eq!(it.len(), 7);
    }

    #[test]
    fn mesh_bounds_ignore_normals() {
        let mesh = Mesh::from_facets(vec![facet(0.0), facet(4.0)]);
        let b = mesh.bounds();
        assert_eq!(b.min.x, 0.0);
        assert_eq!(b.max.x, 5.0);
        assert_eq!(b.max.z, 0.0);
    }

    #[test]
    fn collect_and_into_facets() {
        let mesh: Mesh = (0..4).map(|i| facet(i as f32)).collect();
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.facet(3), Some(&facet(3.0)));
        assert_eq!(mesh.facet(4), None);
        assert_eq!(mesh.into_facets().len(), 4);
    }
}
