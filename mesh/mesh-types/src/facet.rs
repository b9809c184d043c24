//! Facet (triangle) type.

use crate::Vertex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One triangle of an STL mesh: a normal plus three corners in fixed order.
///
/// The normal is stored exactly as the file declared it. It is never
/// recomputed or checked against the corner winding.
///
/// # Example
///
/// ```
/// use mesh_types::{Facet, Vertex};
///
/// let facet = Facet::new(
///     Vertex::new(0.0, 0.0, 1.0),
///     Vertex::new(0.0, 0.0, 0.0),
///     Vertex::new(1.0, 0.0, 0.0),
///     Vertex::new(0.0, 1.0, 0.0),
/// );
///
/// assert_eq!(facet.normal(), Vertex::new(0.0, 0.0, 1.0));
/// assert_eq!(facet.corners()[1], Vertex::new(1.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Facet {
    normal: Vertex,
    v1: Vertex,
    v2: Vertex,
    v3: Vertex,
}

impl Facet {
    /// Create a facet from its normal and its three corners.
    #[inline]
    #[must_use]
    pub const fn new(normal: Vertex, v1: Vertex, v2: Vertex, v3: Vertex) -> Self {
        Self { normal, v1, v2, v3 }
    }

    /// Declared facet normal.
    #[inline]
    #[must_use]
    pub const fn normal(&self) -> Vertex {
        self.normal
    }

    /// First corner.
    #[inline]
    #[must_use]
    pub const fn v1(&self) -> Vertex {
        self.v1
    }

    /// Second corner.
    #[inline]
    #[must_use]
    pub const fn v2(&self) -> Vertex {
        self.v2
    }

    /// Third corner.
    #[inline]
    #[must_use]
    pub const fn v3(&self) -> Vertex {
        self.v3
    }

    /// The three corners as `[v1, v2, v3]`.
    #[inline]
    #[must_use]
    pub const fn corners(&self) -> [Vertex; 3] {
        [self.v1, self.v2, self.v3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_facet() -> Facet {
        Facet::new(
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn corners_keep_declared_order() {
        let f = unit_facet();
        assert_eq!(f.corners(), [f.v1(), f.v2(), f.v3()]);
        assert_eq!(f.v2(), Vertex::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn normal_is_stored_verbatim() {
        // Deliberately inconsistent with the winding.
        let f = Facet::new(
            Vertex::new(0.0, 0.0, -7.5),
            Vertex::ORIGIN,
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
        );
        assert_eq!(f.normal(), Vertex::new(0.0, 0.0, -7.5));
    }

    #[test]
    fn facets_compare_by_value() {
        assert_eq!(unit_facet(), unit_facet());
    }
}
