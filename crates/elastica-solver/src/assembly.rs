//! Jacobian assembly for the implicit step.
//!
//! Builds the force derivatives `∂F/∂x` and `∂F/∂v` as 3×3 block
//! triplets over the free particles only. Anchors and zero-inverse-mass
//! particles have no unknowns; their rows and columns are dropped.
//!
//! Spring blocks with unit direction `d`, length `ℓ`, and rest length `L`:
//!
//! ```text
//! K = k · [(1 - L/ℓ)(I - d dᵀ) + d dᵀ]      D = c · d dᵀ
//! ```
//!
//! scatter `+K` into the off-diagonal pair and `-K` into both diagonals.
//! Tetrahedron blocks use the linear tangent
//!
//! ```text
//! K_ab = -V [λ b_a ⊗ b_b + μ (b_a · b_b) I + μ b_b ⊗ b_a]
//! D_ab = -V c/2 [(b_a · b_b) I + b_b ⊗ b_a]
//! ```

use elastica_material::IsotropicElasticity;
use elastica_math::{outer, BlockTriplets, DMat3};
use elastica_types::constants::DEGENERATE_THRESHOLD;
use elastica_types::ParticleRef;

use crate::config::SolverConfig;
use crate::state::SimulationState;

/// Maps particles to unknown block indices.
#[derive(Debug, Clone, Default)]
pub struct DofMap {
    slots: Vec<Option<usize>>,
    free: Vec<usize>,
}

impl DofMap {
    pub fn build(state: &SimulationState) -> Self {
        let mut slots = Vec::with_capacity(state.particles.len());
        let mut free = Vec::new();
        for (i, p) in state.particles.iter().enumerate() {
            if p.is_free() {
                slots.push(Some(free.len()));
                free.push(i);
            } else {
                slots.push(None);
            }
        }
        Self { slots, free }
    }

    /// Unknown index of a node, `None` for anchors and pinned particles.
    #[inline]
    pub fn slot(&self, r: ParticleRef) -> Option<usize> {
        r.dynamic().and_then(|i| self.slots.get(i).copied().flatten())
    }

    /// Particle index of each unknown.
    pub fn free_particles(&self) -> &[usize] {
        &self.free
    }

    /// Number of unknown blocks.
    pub fn len(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}

/// Force Jacobians `∂F/∂x` and `∂F/∂v`.
#[derive(Debug, Clone)]
pub struct Jacobians {
    pub dfdx: BlockTriplets,
    pub dfdv: BlockTriplets,
}

/// Scatters `block` into (a, b) when both nodes are unknowns.
#[inline]
fn scatter(out: &mut BlockTriplets, dofs: &DofMap, a: ParticleRef, b: ParticleRef, block: &DMat3, scale: f64) {
    if let (Some(i), Some(j)) = (dofs.slot(a), dofs.slot(b)) {
        out.add_block(i, j, block, scale);
    }
}

/// Assembles both Jacobians at the current state.
pub fn assemble_jacobians(state: &SimulationState, dofs: &DofMap, config: &SolverConfig) -> Jacobians {
    let n = dofs.len();
    let capacity = state.springs.len() * 4 + state.tets.len() * 16;
    let mut dfdx = BlockTriplets::with_capacity(n, capacity);
    let mut dfdv = BlockTriplets::with_capacity(n, capacity);

    for spring in &state.springs {
        let d = state.position(spring.to) - state.position(spring.from);
        let length = d.length();
        if length < DEGENERATE_THRESHOLD {
            continue;
        }
        let dir = d / length;
        let ddt = outer(dir, dir);
        let k_block = ((DMat3::IDENTITY - ddt) * (1.0 - spring.rest_length / length) + ddt)
            * spring.stiffness;
        let d_block = ddt * spring.damping;

        let (to, from) = (spring.to, spring.from);
        for (out, block) in [(&mut dfdx, &k_block), (&mut dfdv, &d_block)] {
            scatter(out, dofs, to, from, block, 1.0);
            scatter(out, dofs, from, to, block, 1.0);
            scatter(out, dofs, to, to, block, -1.0);
            scatter(out, dofs, from, from, block, -1.0);
        }
    }

    for tet in &state.tets {
        if tet.degenerate {
            continue;
        }
        let (lambda, mu) = IsotropicElasticity {
            stiffness: tet.stiffness,
            poisson: config.poisson,
        }
        .lame();
        let b = tet.shape_gradients();
        let v = tet.rest_volume;
        for (a, &ra) in tet.vertices.iter().enumerate() {
            for (c, &rc) in tet.vertices.iter().enumerate() {
                let dot = b[a].dot(b[c]);
                let cross = outer(b[c], b[a]);
                let k_block = outer(b[a], b[c]) * lambda + DMat3::IDENTITY * (mu * dot) + cross * mu;
                let d_block = DMat3::IDENTITY * dot + cross;
                scatter(&mut dfdx, dofs, ra, rc, &k_block, -v);
                scatter(&mut dfdv, dofs, ra, rc, &d_block, -v * 0.5 * tet.damping);
            }
        }
    }

    Jacobians { dfdx, dfdv }
}
