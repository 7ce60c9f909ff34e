//! Ground plane collision.
//!
//! Particles below `y = height` are clamped onto the plane and their
//! downward velocity is reflected with a restitution factor.

use elastica_solver::SimulationState;
use elastica_types::constants::GROUND_RESTITUTION;

/// Ground plane collision at a fixed Y height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    /// Height of the ground plane (Y coordinate).
    pub height: f64,
    /// Fraction of normal speed kept after the bounce.
    pub restitution: f64,
}

impl GroundPlane {
    /// Creates a new ground plane at the given height.
    pub fn new(height: f64) -> Self {
        Self {
            height,
            restitution: GROUND_RESTITUTION,
        }
    }

    /// Clamps and bounces free particles. Returns how many were touched.
    pub fn resolve(&self, state: &mut SimulationState) -> u32 {
        let mut touched = 0;
        for p in state.particles.iter_mut().filter(|p| p.is_free()) {
            if p.position.y < self.height {
                p.position.y = self.height;
                if p.velocity.y < 0.0 {
                    p.velocity.y *= -self.restitution;
                }
                p.marked = true;
                touched += 1;
            }
        }
        touched
    }
}
