//! Mesh loading.
//!
//! A failed load is not an error for the simulation: the loader logs the
//! cause and returns `None`, and the caller decides whether to keep its
//! previous setup.

use std::path::Path;

use tracing::warn;

use elastica_types::{ElasticaError, ElasticaResult};

use crate::generators::extract_surface;
use crate::mesh::TetMesh;

/// Loads a JSON-serialized [`TetMesh`], returning `None` on any failure.
///
/// If the file carries tetrahedra but no surface faces, the surface is
/// extracted from the tetrahedra.
pub fn load_json(path: impl AsRef<Path>) -> Option<TetMesh> {
    let path = path.as_ref();
    match try_load_json(path) {
        Ok(mesh) => Some(mesh),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "mesh load failed");
            None
        }
    }
}

/// Loads a JSON-serialized [`TetMesh`], reporting the cause of failure.
pub fn try_load_json(path: &Path) -> ElasticaResult<TetMesh> {
    let text = std::fs::read_to_string(path)?;
    let mut mesh: TetMesh =
        serde_json::from_str(&text).map_err(|e| ElasticaError::Serialization(e.to_string()))?;

    if mesh.faces.is_empty() && !mesh.tets.is_empty() {
        let (faces, face_to_tet) = extract_surface(&mesh.points, &mesh.tets);
        mesh.faces = faces;
        mesh.face_to_tet = face_to_tet;
    }

    mesh.validate()?;
    if mesh.is_empty() {
        return Err(ElasticaError::InvalidMesh("mesh has no tetrahedra".into()));
    }
    Ok(mesh)
}

/// Writes a mesh as JSON.
pub fn save_json(mesh: &TetMesh, path: impl AsRef<Path>) -> ElasticaResult<()> {
    let text =
        serde_json::to_string(mesh).map_err(|e| ElasticaError::Serialization(e.to_string()))?;
    std::fs::write(path, text)?;
    Ok(())
}
