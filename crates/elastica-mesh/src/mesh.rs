//! Core tetrahedral mesh type.
//!
//! Flat index buffers as produced by a tetrahedralizer: four indices per
//! tetrahedron, three per surface face, and for every face the tetrahedron
//! it bounds.

use serde::{Deserialize, Serialize};

use elastica_math::DVec3;
use elastica_types::{ElasticaError, ElasticaResult};

/// A tetrahedral volume mesh with its boundary surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TetMesh {
    /// Point coordinates.
    pub points: Vec<DVec3>,
    /// Tetrahedron indices, stored flat: `[t0v0, t0v1, t0v2, t0v3, t1v0, ...]`.
    pub tets: Vec<u32>,
    /// Surface triangle indices, stored flat.
    pub faces: Vec<u32>,
    /// For each surface face, the tetrahedron it belongs to.
    pub face_to_tet: Vec<u32>,
}

impl TetMesh {
    /// Returns the number of points.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of tetrahedra.
    #[inline]
    pub fn tet_count(&self) -> usize {
        self.tets.len() / 4
    }

    /// Returns the number of surface faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len() / 3
    }

    /// Returns the four vertex indices of tetrahedron `t`.
    #[inline]
    pub fn tet(&self, t: usize) -> [u32; 4] {
        let base = t * 4;
        [
            self.tets[base],
            self.tets[base + 1],
            self.tets[base + 2],
            self.tets[base + 3],
        ]
    }

    /// Returns the three vertex indices of surface face `f`.
    #[inline]
    pub fn face(&self, f: usize) -> [u32; 3] {
        let base = f * 3;
        [self.faces[base], self.faces[base + 1], self.faces[base + 2]]
    }

    /// True when the mesh carries no geometry (the "null" load result).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() || self.tets.is_empty()
    }

    /// Signed volume of tetrahedron `t` (positive for right-handed ordering).
    pub fn tet_volume(&self, t: usize) -> f64 {
        let [a, b, c, d] = self.tet(t).map(|i| self.points[i as usize]);
        (b - a).dot((c - a).cross(d - a)) / 6.0
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - Index buffers have the right stride
    /// - All indices are within bounds
    /// - `face_to_tet` has one entry per face, each a valid tetrahedron
    /// - No tetrahedron repeats a vertex
    pub fn validate(&self) -> ElasticaResult<()> {
        let n = self.points.len();

        if self.tets.len() % 4 != 0 {
            return Err(ElasticaError::InvalidMesh(
                "Tetrahedron index count is not divisible by 4".into(),
            ));
        }
        if self.faces.len() % 3 != 0 {
            return Err(ElasticaError::InvalidMesh(
                "Face index count is not divisible by 3".into(),
            ));
        }
        if self.face_to_tet.len() != self.face_count() {
            return Err(ElasticaError::InvalidMesh(format!(
                "face_to_tet count ({}) != face count ({})",
                self.face_to_tet.len(),
                self.face_count()
            )));
        }

        for (i, &idx) in self.tets.iter().chain(self.faces.iter()).enumerate() {
            if idx as usize >= n {
                return Err(ElasticaError::InvalidMesh(format!(
                    "Index {idx} at position {i} is out of range (point count: {n})"
                )));
            }
        }

        let tet_count = self.tet_count();
        if let Some(&bad) = self.face_to_tet.iter().find(|&&t| t as usize >= tet_count) {
            return Err(ElasticaError::InvalidMesh(format!(
                "face_to_tet entry {bad} out of range (tet count: {tet_count})"
            )));
        }

        for t in 0..tet_count {
            let v = self.tet(t);
            for a in 0..4 {
                for b in (a + 1)..4 {
                    if v[a] == v[b] {
                        return Err(ElasticaError::InvalidMesh(format!(
                            "Tetrahedron {t} has repeated vertex indices: {v:?}"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}
