//! Boundary map: compact numbering of surface points.
//!
//! The collision oracle only sees points on the surface. Each distinct
//! face corner gets a compact index in first-seen order.

use std::collections::HashMap;

use elastica_types::ParticleRef;

/// Surface points and per-face compact corner indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryMap {
    /// Distinct surface points, by compact index.
    pub points: Vec<ParticleRef>,
    /// Compact corner indices of each face.
    pub faces: Vec<[u32; 3]>,
    lookup: HashMap<ParticleRef, u32>,
}

impl BoundaryMap {
    pub fn build(faces: &[[ParticleRef; 3]]) -> Self {
        let mut map = Self::default();
        for face in faces {
            let slots = face.map(|corner| map.slot_or_insert(corner));
            map.faces.push(slots);
        }
        map
    }

    fn slot_or_insert(&mut self, r: ParticleRef) -> u32 {
        if let Some(&slot) = self.lookup.get(&r) {
            return slot;
        }
        let slot = self.points.len() as u32;
        self.points.push(r);
        self.lookup.insert(r, slot);
        slot
    }

    /// Compact index of a surface point.
    pub fn slot(&self, r: ParticleRef) -> Option<u32> {
        self.lookup.get(&r).copied()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
