//! JSON scene-graph export.
//!
//! Produces an Assimp-style JSON document holding a single mesh:
//!
//! ```json
//! {
//!   "rootnode": { "name": "part", "transformation": [], "meshes": [0] },
//!   "meshes": [{
//!     "name": "part",
//!     "materialindex": 0,
//!     "primitivetypes": 0,
//!     "vertices": [x, y, z, ...],
//!     "normals":  [nx, ny, nz, ...],
//!     "faces": [[0, 1, 2], [3, 4, 5], ...]
//!   }]
//! }
//! ```
//!
//! Vertices are the flattened corner sequence, so face `i` is always
//! `[3i, 3i+1, 3i+2]`, and each facet normal is repeated once per corner.

use std::io::Write;

use mesh_types::Mesh;
use serde::Serialize;

use crate::error::{IoError, IoResult};

/// Parameters for JSON scene export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneExportParams {
    /// Name of the root node and of the mesh.
    ///
    /// Default: `"mesh"`
    pub name: String,

    /// Indent the output.
    ///
    /// Default: `false`
    pub pretty: bool,
}

impl Default for SceneExportParams {
    fn default() -> Self {
        Self {
            name: "mesh".to_string(),
            pretty: false,
        }
    }
}

impl SceneExportParams {
    /// Create params with the given scene name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Scene document root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneDocument {
    /// Root node of the scene graph.
    pub rootnode: SceneNode,
    /// Meshes referenced by the nodes.
    pub meshes: Vec<SceneMesh>,
}

/// A node of the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    /// Node name.
    pub name: String,
    /// Node transformation; empty means identity.
    pub transformation: Vec<f32>,
    /// Indices into [`SceneDocument::meshes`].
    pub meshes: Vec<u32>,
}

/// Flat triangle buffers of one mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneMesh {
    /// Mesh name.
    pub name: String,
    /// Material index, always 0.
    pub materialindex: u32,
    /// Primitive type flags, always 0.
    pub primitivetypes: u32,
    /// Flattened `x, y, z` of every corner.
    pub vertices: Vec<f32>,
    /// Flattened per-corner normals.
    pub normals: Vec<f32>,
    /// Corner indices per facet.
    pub faces: Vec<[u32; 3]>,
}

impl SceneDocument {
    /// Build a scene holding `mesh`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::TooManyFacets`] if the corner indices do not fit in
    /// 32 bits.
    pub fn from_mesh(mesh: &Mesh, name: &str) -> IoResult<Self> {
        let facets = mesh.facets();
        let too_many = || IoError::TooManyFacets {
            count: facets.len(),
        };
        u32::try_from(facets.len() * 3).map_err(|_| too_many())?;

        let mut vertices = Vec::with_capacity(facets.len() * 9);
        let mut normals = Vec::with_capacity(facets.len() * 9);
        let mut faces = Vec::with_capacity(facets.len());

        let mut next: u32 = 0;
        for facet in facets {
            for corner in facet.corners() {
                vertices.extend_from_slice(&corner.to_array());
                normals.extend_from_slice(&facet.normal().to_array());
            }
            faces.push([next, next + 1, next + 2]);
            next += 3;
        }

        Ok(Self {
            rootnode: SceneNode {
                name: name.to_string(),
                transformation: Vec::new(),
                meshes: vec![0],
            },
            meshes: vec![SceneMesh {
                name: name.to_string(),
                materialindex: 0,
                primitivetypes: 0,
                vertices,
                normals,
                faces,
            }],
        })
    }
}

/// Write `mesh` as a JSON scene document.
///
/// Non-finite floats have no JSON representation and are written as `null`.
///
/// # Errors
///
/// Returns an error if the mesh is too large or writing fails.
pub fn write_scene_json<W: Write>(
    mesh: &Mesh,
    params: &SceneExportParams,
    writer: W,
) -> IoResult<()> {
    let document = SceneDocument::from_mesh(mesh, &params.name)?;
    if params.pretty {
        serde_json::to_writer_pretty(writer, &document)?;
    } else {
        serde_json::to_writer(writer, &document)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::{Facet, Vertex};

    fn two_facets() -> Mesh {
        Mesh::from_facets(vec![
            Facet::new(
                Vertex::new(0.0, 0.0, 1.0),
                Vertex::new(0.0, 0.0, 0.0),
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(0.0, 1.0, 0.0),
            ),
            Facet::new(
                Vertex::new(0.0, 0.0, -1.0),
                Vertex::new(1.0, 0.0, 0.0),
                Vertex::new(1.0, 1.0, 0.0),
                Vertex::new(0.0, 1.0, 0.0),
            ),
        ])
    }

    #[test]
    fn buffers_have_expected_lengths() {
        let doc = SceneDocument::from_mesh(&two_facets(), "part").unwrap();
        let mesh = &doc.meshes[0];
        assert_eq!(mesh.faces, vec![[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mesh.vertices.len(), 18);
        assert_eq!(mesh.normals.len(), 18);
        assert_eq!(&mesh.vertices[3..6], &[1.0, 0.0, 0.0]);
        assert_eq!(&mesh.normals[9..18], &[0.0, 0.0, -1.0, 0.0, 0.0, -1.0, 0.0, 0.0, -1.0]);
        assert_eq!(doc.rootnode.meshes, vec![0]);
    }

    #[test]
    fn json_shape() {
        let mut out = Vec::new();
        write_scene_json(&two_facets(), &SceneExportParams::named("part"), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["rootnode"]["name"], "part");
        assert_eq!(value["rootnode"]["transformation"], serde_json::json!([]));
        assert_eq!(value["meshes"][0]["materialindex"], 0);
        assert_eq!(value["meshes"][0]["faces"][1], serde_json::json!([3, 4, 5]));
        assert_eq!(value["meshes"][0]["vertices"].as_array().unwrap().len(), 18);
    }

    #[test]
    fn empty_mesh_exports_empty_buffers() {
        let params = SceneExportParams {
            pretty: true,
            ..Default::default()
        };
        let mut out = Vec::new();
        write_scene_json(&Mesh::new(), &params, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["meshes"][0]["faces"], serde_json::json!([]));
        assert_eq!(value["rootnode"]["name"], "mesh");
    }
}
