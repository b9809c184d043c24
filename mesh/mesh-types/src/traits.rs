//! Traits for mesh types.

/// Trait for types that report mesh topology counts.
///
/// STL meshes are unindexed, so every face owns its three vertices and
/// `vertex_count` is always `3 * face_count`.
pub trait MeshTopology {
    /// Get the number of vertices in the flattened corner sequence.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces (triangles).
    fn face_count(&self) -> usize;

    /// Check if the mesh has no faces.
    fn is_empty(&self) -> bool {
        self.face_count() == 0
    }
}
