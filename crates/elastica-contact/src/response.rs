//! Collision response pass.
//!
//! Pushes boundary positions into the oracle, then repeatedly pulls
//! vertex-face contacts and projects each intruding vertex onto the face
//! plane plus a margin along the face normal. The corrected vertex has its
//! velocity zeroed and is marked. Rounds stop when the oracle reports no
//! vertex-face contact or after `max_iterations` rounds.

use elastica_math::DVec3;
use elastica_solver::{SimulationState, SolverConfig};
use elastica_types::ParticleRef;
use tracing::{debug, warn};

use crate::geometry::face_normal;
use crate::oracle::CollisionOracle;

/// Outcome of one collision pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// Oracle query rounds performed.
    pub iterations: u32,
    /// Vertex-face contacts reported over all rounds.
    pub vertex_face_contacts: u32,
    /// Edge-edge contacts reported by the last query.
    pub edge_edge_contacts: u32,
    /// Position corrections applied.
    pub corrections: u32,
    /// True if the last query reported no vertex-face contact.
    pub resolved: bool,
}

/// Post-integration collision correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResponse {
    /// Offset past the face plane after projection.
    pub margin: f64,
    /// Cap on query rounds.
    pub max_iterations: u32,
}

impl CollisionResponse {
    pub fn new(margin: f64, max_iterations: u32) -> Self {
        Self {
            margin,
            max_iterations,
        }
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::new(config.collision_margin, config.collision_max_iterations)
    }

    /// Rebuilds the oracle from the current boundary.
    pub fn init_oracle(&self, oracle: &mut dyn CollisionOracle, state: &SimulationState) {
        let boundary = state.boundary();
        let positions: Vec<_> = boundary.points.iter().map(|&r| state.position(r)).collect();
        oracle.init_system(&positions, &boundary.faces);
        debug!(
            oracle = oracle.name(),
            points = positions.len(),
            faces = boundary.faces.len(),
            "Initialized collision oracle"
        );
    }

    /// Runs the pass. Marks accumulate; the caller clears them once per
    /// frame.
    pub fn resolve(&self, oracle: &mut dyn CollisionOracle, state: &mut SimulationState) -> CollisionReport {
        let mut report = CollisionReport {
            resolved: true,
            ..Default::default()
        };
        if state.boundary().is_empty() {
            return report;
        }

        for (slot, &r) in state.boundary().points.iter().enumerate() {
            oracle.update_vertex(slot as u32, state.position(r));
        }

        for _ in 0..self.max_iterations {
            let collisions = oracle.get_collisions();
            report.iterations += 1;
            report.edge_edge_contacts = collisions.edge_edge.len() as u32;
            report.resolved = collisions.vertex_face.is_empty();
            if report.resolved {
                break;
            }
            report.vertex_face_contacts += collisions.vertex_face.len() as u32;

            for contact in &collisions.vertex_face {
                let (Some(&r), Some(face)) = (
                    state.boundary().points.get(contact.vertex as usize),
                    state.faces.get(contact.face as usize).copied(),
                ) else {
                    warn!(?contact, "Oracle reported a contact outside the boundary");
                    continue;
                };
                let ParticleRef::Dynamic(pi) = r else {
                    continue;
                };
                let [a, b, c] = face.map(|v| state.position(v));
                let Some(normal) = face_normal(a, b, c) else {
                    continue;
                };

                let p = &mut state.particles[pi as usize];
                if !p.is_free() {
                    continue;
                }
                let distance = (p.position - a).dot(normal);
                p.position += normal * (self.margin - distance);
                p.velocity = DVec3::ZERO;
                p.marked = true;
                oracle.update_vertex(contact.vertex, p.position);
                report.corrections += 1;
            }
        }

        if !report.resolved {
            debug!(
                iterations = report.iterations,
                "Collision pass hit its iteration cap with contacts remaining"
            );
        }
        report
    }
}
