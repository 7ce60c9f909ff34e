//! Per-element stress evaluation and per-vertex averaging.

use elastica_material::strain::evaluate;
use elastica_material::{IsotropicElasticity, StressState};
use elastica_math::DMat3;

use crate::config::SolverConfig;
use crate::state::SimulationState;

/// Evaluates every tetrahedron's strain and stress under the configured
/// strain mode, caches the stress norm on the element, and averages the
/// norms onto incident particles.
///
/// Returns the per-element states in element order. Degenerate elements
/// report zero stress.
pub fn update_stress(state: &mut SimulationState, config: &SolverConfig) -> Vec<StressState> {
    for p in &mut state.particles {
        p.stress_sum = 0.0;
        p.stress_count = 0;
    }

    let mut out = Vec::with_capacity(state.tets.len());
    for i in 0..state.tets.len() {
        let tet = state.tets[i];
        let result = if tet.degenerate {
            StressState {
                deformation: DMat3::IDENTITY,
                strain: DMat3::ZERO,
                stress: DMat3::ZERO,
                norm: 0.0,
            }
        } else {
            let elasticity = IsotropicElasticity {
                stiffness: tet.stiffness,
                poisson: config.poisson,
            };
            evaluate(
                config.strain_mode,
                state.tet_positions(&tet),
                &tet.rest_inv,
                &elasticity,
            )
        };

        state.tets[i].stress_norm = result.norm;
        for corner in tet.vertices {
            if let Some(pi) = corner.dynamic() {
                let p = &mut state.particles[pi];
                p.stress_sum += result.norm;
                p.stress_count += 1;
            }
        }
        out.push(result);
    }
    out
}
