//! Force accumulation: gravity, springs, and tetrahedral elasticity.
//!
//! Accumulators are zeroed at the start of [`compute_forces`]. Anchors
//! receive no force.

use elastica_material::strain::{deformation_gradient, edge_matrix, linear_strain};
use elastica_material::IsotropicElasticity;
use elastica_math::DVec3;
use elastica_types::constants::DEGENERATE_THRESHOLD;
use elastica_types::ParticleRef;

use crate::config::SolverConfig;
use crate::elements::{Spring, TetElement};
use crate::state::SimulationState;

/// Unit direction and length of a spring, from `from` toward `to`.
///
/// Coincident endpoints yield `(X, ε)` so nothing downstream divides by zero.
#[inline]
pub fn spring_frame(state: &SimulationState, spring: &Spring) -> (DVec3, f64) {
    let d = state.position(spring.to) - state.position(spring.from);
    let length = d.length();
    if length < DEGENERATE_THRESHOLD {
        (DVec3::X, f64::EPSILON)
    } else {
        (d / length, length)
    }
}

/// Force applied to `to` by a spring (`from` receives the negation).
pub fn spring_force(state: &SimulationState, spring: &Spring) -> DVec3 {
    let (dir, length) = spring_frame(state, spring);
    let dv = state.velocity(spring.to) - state.velocity(spring.from);
    let tension = (length - spring.rest_length) * spring.stiffness * dir
        + spring.damping * dir * dv.dot(dir);
    -tension
}

/// Nodal forces of one tetrahedron: elastic plus viscous.
///
/// Elastic force on corner `a` is `-V · P · b_a` with `P` the Piola stress
/// of the selected model. Damping uses the strain rate `sym(Σ v_b ⊗ b_b)`.
pub fn tet_forces(state: &SimulationState, tet: &TetElement, config: &SolverConfig) -> [DVec3; 4] {
    if tet.degenerate {
        return [DVec3::ZERO; 4];
    }
    let model = config.strain_mode.model();
    let elasticity = IsotropicElasticity {
        stiffness: tet.stiffness,
        poisson: config.poisson,
    };

    let f = deformation_gradient(state.tet_positions(tet), &tet.rest_inv);
    let stress = elasticity.stress(&model.strain(&f));
    let piola = model.piola(&f, &stress);

    let f_dot = edge_matrix(state.tet_velocities(tet)) * tet.rest_inv;
    let viscous = linear_strain(&f_dot) * tet.damping;

    let total = piola + viscous;
    tet.shape_gradients().map(|b| -tet.rest_volume * (total * b))
}

/// Recomputes every particle's force accumulator.
pub fn compute_forces(state: &mut SimulationState, config: &SolverConfig) {
    let gravity = DVec3::from_array(config.gravity);
    for p in &mut state.particles {
        p.force = if p.is_free() {
            gravity / p.inv_mass
        } else {
            DVec3::ZERO
        };
    }

    for i in 0..state.springs.len() {
        let spring = state.springs[i];
        let force = spring_force(state, &spring);
        add_force(state, spring.to, force);
        add_force(state, spring.from, -force);
    }

    for i in 0..state.tets.len() {
        let tet = state.tets[i];
        let forces = tet_forces(state, &tet, config);
        for (corner, force) in tet.vertices.iter().zip(forces) {
            add_force(state, *corner, force);
        }
    }
}

#[inline]
fn add_force(state: &mut SimulationState, r: ParticleRef, force: DVec3) {
    if let Some(i) = r.dynamic() {
        state.particles[i].force += force;
    }
}
