//! Reference collision oracle testing every vertex against every face.
//!
//! A vertex collides with a face when it sits behind the face plane by
//! less than `thickness` and projects inside the triangle. Faces touching
//! the vertex or one of its surface neighbours are skipped, so a body's
//! own smooth surface does not collide with itself.

use std::collections::HashSet;

use elastica_math::DVec3;

use crate::contact::{Collisions, EdgeEdgeContact, VertexFaceContact};
use crate::geometry::{project_to_plane, segment_distance};
use crate::oracle::CollisionOracle;

/// O(V·F) collision oracle.
pub struct BruteForceOracle {
    /// Maximum depth behind a face that still counts as contact.
    pub thickness: f64,
    /// Also report edge-edge proximity.
    pub detect_edges: bool,
    positions: Vec<DVec3>,
    previous: Vec<DVec3>,
    faces: Vec<[u32; 3]>,
    edges: Vec<[u32; 2]>,
    neighbours: Vec<HashSet<u32>>,
}

impl BruteForceOracle {
    pub fn new(thickness: f64) -> Self {
        Self {
            thickness,
            detect_edges: false,
            positions: Vec::new(),
            previous: Vec::new(),
            faces: Vec::new(),
            edges: Vec::new(),
            neighbours: Vec::new(),
        }
    }

    /// Enables edge-edge reporting.
    pub fn with_edges(mut self) -> Self {
        self.detect_edges = true;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn position(&self, index: u32) -> Option<DVec3> {
        self.positions.get(index as usize).copied()
    }

    fn is_near(&self, vertex: u32, face: &[u32; 3]) -> bool {
        face.iter()
            .any(|&c| c == vertex || self.neighbours[vertex as usize].contains(&c))
    }

    fn vertex_face(&self) -> Vec<VertexFaceContact> {
        let mut out = Vec::new();
        for (vi, &p) in self.positions.iter().enumerate() {
            let vertex = vi as u32;
            for (fi, face) in self.faces.iter().enumerate() {
                if self.is_near(vertex, face) {
                    continue;
                }
                let [a, b, c] = face.map(|i| self.positions[i as usize]);
                let Some(proj) = project_to_plane(p, a, b, c) else {
                    continue;
                };
                let depth = -proj.signed_distance;
                if depth <= 0.0 || depth > self.thickness || !proj.is_inside() {
                    continue;
                }

                let before = (self.previous[vi] - a).dot(proj.normal);
                let time = if before > 0.0 {
                    (before / (before + depth)).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                out.push(VertexFaceContact {
                    vertex,
                    face: fi as u32,
                    time,
                    depth,
                });
            }
        }
        out
    }

    fn edge_edge(&self) -> Vec<EdgeEdgeContact> {
        let mut out = Vec::new();
        for (i, ea) in self.edges.iter().enumerate() {
            for eb in &self.edges[i + 1..] {
                if ea.iter().any(|v| eb.contains(v)) {
                    continue;
                }
                let [p0, p1] = ea.map(|v| self.positions[v as usize]);
                let [q0, q1] = eb.map(|v| self.positions[v as usize]);
                let distance = segment_distance(p0, p1, q0, q1);
                if distance >= self.thickness {
                    continue;
                }
                let [r0, r1] = ea.map(|v| self.previous[v as usize]);
                let [s0, s1] = eb.map(|v| self.previous[v as usize]);
                let before = segment_distance(r0, r1, s0, s1);
                let time = if before > self.thickness {
                    ((before - self.thickness) / (before - distance)).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                out.push(EdgeEdgeContact {
                    edge_a: *ea,
                    edge_b: *eb,
                    time,
                    distance,
                });
            }
        }
        out
    }
}

impl Default for BruteForceOracle {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl CollisionOracle for BruteForceOracle {
    fn init_system(&mut self, positions: &[DVec3], faces: &[[u32; 3]]) {
        self.positions = positions.to_vec();
        self.previous = positions.to_vec();
        self.faces = faces.to_vec();

        self.neighbours = vec![HashSet::new(); positions.len()];
        let mut edges = HashSet::new();
        for face in faces {
            for k in 0..3 {
                let (a, b) = (face[k], face[(k + 1) % 3]);
                self.neighbours[a as usize].insert(b);
                self.neighbours[b as usize].insert(a);
                edges.insert([a.min(b), a.max(b)]);
            }
        }
        let mut edges: Vec<[u32; 2]> = edges.into_iter().collect();
        edges.sort_unstable();
        self.edges = edges;
    }

    fn update_vertex(&mut self, index: u32, position: DVec3) {
        let i = index as usize;
        if i < self.positions.len() {
            self.previous[i] = self.positions[i];
            self.positions[i] = position;
        }
    }

    fn get_collisions(&mut self) -> Collisions {
        Collisions {
            vertex_face: self.vertex_face(),
            edge_edge: if self.detect_edges {
                self.edge_edge()
            } else {
                Vec::new()
            },
        }
    }

    fn name(&self) -> &str {
        "brute_force"
    }
}
