//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

use crate::Vertex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB) in STL precision.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3, Vertex};
///
/// let aabb = Aabb::from_vertices([
///     Vertex::new(0.0, 0.0, 0.0),
///     Vertex::new(10.0, 5.0, 3.0),
///     Vertex::new(-2.0, 8.0, 1.0),
/// ]);
///
/// assert_eq!(aabb.min, Point3::new(-2.0, 0.0, 0.0));
/// assert_eq!(aabb.max, Point3::new(10.0, 8.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f32>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f32>,
}

impl Aabb {
    /// Create an empty (invalid) AABB.
    ///
    /// An empty AABB has min > max, which is useful as a starting point
    /// for expanding to include points.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: Point3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    /// Create an AABB enclosing every vertex.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_vertices(vertices: impl IntoIterator<Item = Vertex>) -> Self {
        let mut aabb = Self::empty();
        for vertex in vertices {
            aabb.expand_to_include(vertex);
        }
        aabb
    }

    /// Check if the AABB is empty (has no valid extent).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box so that it contains `vertex`.
    ///
    /// NaN coordinates are skipped by `f32::min`/`f32::max`.
    pub fn expand_to_include(&mut self, vertex: Vertex) {
        self.min.x = self.min.x.min(vertex.x());
        self.min.y = self.min.y.min(vertex.y());
        self.min.z = self.min.z.min(vertex.z());
        self.max.x = self.max.x.max(vertex.x());
        self.max.y = self.max.y.max(vertex.y());
        self.max.z = self.max.z.max(vertex.z());
    }

    /// Get the size (dimensions) of the AABB.
    ///
    /// Returns a zero vector for empty boxes.
    #[must_use]
    pub fn size(&self) -> Vector3<f32> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Get the center of the AABB.
    #[must_use]
    pub fn center(&self) -> Point3<f32> {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
