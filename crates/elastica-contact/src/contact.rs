//! Contact data reported by a collision oracle.
//!
//! Indices are in the oracle's space: vertices are compact boundary
//! indices, faces index the surface face list.

use serde::{Deserialize, Serialize};

/// A boundary vertex intruding into a surface face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexFaceContact {
    /// Compact boundary index of the vertex.
    pub vertex: u32,
    /// Surface face index.
    pub face: u32,
    /// Fraction of the last update at which the vertex reached the face
    /// plane, in `[0, 1]`.
    pub time: f64,
    /// Distance behind the face plane (positive when penetrating).
    pub depth: f64,
}

impl VertexFaceContact {
    /// Returns true if the contact represents actual penetration.
    pub fn is_penetrating(&self) -> bool {
        self.depth > 0.0
    }
}

/// Two boundary edges closer than the oracle's thickness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeEdgeContact {
    pub edge_a: [u32; 2],
    pub edge_b: [u32; 2],
    /// Fraction of the last update at which the edges came within range.
    pub time: f64,
    /// Closest distance between the edges.
    pub distance: f64,
}

/// Everything an oracle reports in one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collisions {
    pub vertex_face: Vec<VertexFaceContact>,
    pub edge_edge: Vec<EdgeEdgeContact>,
}

impl Collisions {
    pub fn is_empty(&self) -> bool {
        self.vertex_face.is_empty() && self.edge_edge.is_empty()
    }
}
