//! Single-precision vertex type.

use std::hash::{Hash, Hasher};

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point (or direction) in 3D space with `f32` coordinates.
///
/// `Vertex` is an immutable value: it is built fully formed by
/// [`Vertex::new`] and only read afterwards. Facet normals use the same type.
///
/// Equality and hashing compare the exact bit pattern of each coordinate.
/// That makes `Vertex` usable as a map key and keeps `Eq` consistent with
/// `Hash`, at the price of `0.0 != -0.0` and `NaN == NaN` (for the same NaN
/// payload).
///
/// # Example
///
/// ```
/// use mesh_types::Vertex;
///
/// let v = Vertex::new(1.0, 2.0, 3.0);
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
/// assert_eq!(v, Vertex::from([1.0, 2.0, 3.0]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    x: f32,
    y: f32,
    z: f32,
}

impl Vertex {
    /// The origin `(0, 0, 0)`.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vertex from its three coordinates.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// X coordinate.
    #[inline]
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Y coordinate.
    #[inline]
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Z coordinate.
    #[inline]
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.z
    }

    /// Coordinates as `[x, y, z]`.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Raw IEEE-754 bit patterns of `[x, y, z]`.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Vertex;
    ///
    /// let v = Vertex::new(1.0, -0.0, 0.0);
    /// assert_eq!(v.to_bits(), [0x3F80_0000, 0x8000_0000, 0]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> [u32; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }

    /// Position as an nalgebra point.
    #[inline]
    #[must_use]
    pub fn to_point(self) -> Point3<f32> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Direction as an nalgebra vector, for facet normals.
    #[inline]
    #[must_use]
    pub fn to_vector(self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bits().hash(state);
    }
}

impl From<[f32; 3]> for Vertex {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<(f32, f32, f32)> for Vertex {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<Point3<f32>> for Vertex {
    fn from(point: Point3<f32>) -> Self {
        Self::new(point.x, point.y, point.z)
    }
}

impl From<Vector3<f32>> for Vertex {
    fn from(vector: Vector3<f32>) -> Self {
        Self::new(vector.x, vector.y, vector.z)
    }
}

impl From<Vertex> for [f32; 3] {
    fn from(vertex: Vertex) -> Self {
        vertex.to_array()
    }
}
