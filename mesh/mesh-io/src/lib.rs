//! STL file I/O.
//!
//! This crate decodes binary and ASCII STL into a [`Mesh`], re-encodes
//! meshes, and exports them as a JSON scene graph.
//!
//! - **Detection** - [`read_stl`] tries binary first, rewinds and falls back
//!   to ASCII
//! - **Binary** - [`read_binary`] / [`write_binary`], byte-exact and lossless
//! - **ASCII** - [`read_ascii`] / [`write_ascii`]
//! - **JSON** - [`write_scene_json`], an Assimp-style scene document
//!
//! The stream functions borrow a caller-owned reader or writer and never
//! open or close anything. The `load_*`/`save_*` helpers handle files.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_stl, save_stl, StlWriteParams};
//! use mesh_types::MeshTopology;
//!
//! let mesh = load_stl("model.stl").unwrap();
//! println!("Loaded {} facets", mesh.face_count());
//!
//! save_stl(&mesh, "model-binary.stl", &StlWriteParams::default()).unwrap();
//! ```
//!
//! # Quality Standards
//!
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod float;
mod scene;
mod stl;

pub use error::{IoError, IoResult};
pub use float::{decode_f32, encode_f32};
pub use scene::{SceneDocument, SceneExportParams, SceneMesh, SceneNode, write_scene_json};
pub use stl::{
    BinaryRead, DEFAULT_HEADER, Detected, FACET_SIZE, HEADER_SIZE, HEADER_TEXT_SIZE, Mismatch,
    StlFormat, StlWriteParams, read_ascii, read_binary, read_stl, read_stl_detailed,
    to_binary_bytes, write_ascii, write_binary, write_stl,
};

pub use mesh_types::Mesh;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::info;

/// Load a mesh from an STL file of either variant.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or any
/// error of [`read_stl`].
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<Mesh> {
    load_stl_detailed(path).map(|detected| detected.mesh)
}

/// Load a mesh and report which STL variant the file used.
///
/// # Errors
///
/// See [`load_stl`].
pub fn load_stl_detailed<P: AsRef<Path>>(path: P) -> IoResult<Detected> {
    let path = path.as_ref();
    let file = open(path)?;
    let mut reader = BufReader::new(file);
    let detected = read_stl_detailed(&mut reader)?;
    info!(
        path = %path.display(),
        format = %detected.format,
        facets = detected.mesh.facets().len(),
        "loaded STL"
    );
    Ok(detected)
}

/// Save a mesh to an STL file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written, or if a
/// binary mesh has more than `u32::MAX` facets.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{load_stl, save_stl, StlWriteParams};
///
/// let mesh = load_stl("input.stl").unwrap();
/// save_stl(&mesh, "output.stl", &StlWriteParams::default()).unwrap();
/// save_stl(&mesh, "output_ascii.stl", &StlWriteParams::ascii()).unwrap();
/// ```
pub fn save_stl<P: AsRef<Path>>(mesh: &Mesh, path: P, params: &StlWriteParams) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_stl(mesh, params, &mut writer)?;
    writer.flush()?;
    info!(path = %path.display(), format = %params.format, "saved STL");
    Ok(())
}

/// Save a mesh as a JSON scene document.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_scene_json<P: AsRef<Path>>(
    mesh: &Mesh,
    path: P,
    params: &SceneExportParams,
) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_scene_json(mesh, params, &mut writer)?;
    writer.flush()?;
    info!(path = %path.display(), "saved JSON scene");
    Ok(())
}

fn open(path: &Path) -> IoResult<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mesh_types::{Facet, MeshTopology, Vertex};

    fn create_test_triangle() -> Mesh {
        Mesh::from_facets(vec![Facet::new(
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
        )])
    }

    #[test]
    fn roundtrip_binary_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.stl");
        save_stl(&create_test_triangle(), &path, &StlWriteParams::default()).unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 134);
        let detected = load_stl_detailed(&path).unwrap();
        assert_eq!(detected.format, StlFormat::Binary);
        assert_eq!(detected.mesh, create_test_triangle());
    }

    #[test]
    fn roundtrip_ascii_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_ascii.stl");
        save_stl(&create_test_triangle(), &path, &StlWriteParams::ascii()).unwrap();

        let detected = load_stl_detailed(&path).unwrap();
        assert_eq!(detected.format, StlFormat::Ascii);
        assert_eq!(detected.mesh.face_count(), 1);
        assert_eq!(detected.mesh, create_test_triangle());
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_stl("nonexistent_file_12345.stl");
        match result {
            Err(IoError::FileNotFound { path }) => {
                assert!(path.to_string_lossy().contains("nonexistent"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn scene_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        save_scene_json(
            &create_test_triangle(),
            &path,
            &SceneExportParams::named("tri"),
        )
        .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["meshes"][0]["name"], "tri");
        assert_eq!(value["meshes"][0]["faces"], serde_json::json!([[0, 1, 2]]));
    }
}
