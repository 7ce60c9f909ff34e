//! Energy diagnostics.

use elastica_material::strain::deformation_gradient;
use elastica_material::IsotropicElasticity;
use elastica_math::DVec3;

use crate::config::SolverConfig;
use crate::forces::spring_frame;
use crate::state::SimulationState;

/// Energy breakdown of the current state.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyReport {
    pub kinetic: f64,
    pub elastic: f64,
    pub gravitational: f64,
}

impl EnergyReport {
    pub fn total(&self) -> f64 {
        self.kinetic + self.elastic + self.gravitational
    }
}

/// Kinetic energy `Σ ½ m |v|²` of free particles.
pub fn kinetic_energy(state: &SimulationState) -> f64 {
    state
        .particles
        .iter()
        .filter(|p| p.is_free())
        .map(|p| 0.5 * p.velocity.length_squared() / p.inv_mass)
        .sum()
}

/// Spring energy `Σ ½ k (ℓ - L)²` plus tetrahedral strain energy
/// `Σ ½ V σ : ε` under the configured strain measure.
pub fn elastic_energy(state: &SimulationState, config: &SolverConfig) -> f64 {
    let springs: f64 = state
        .springs
        .iter()
        .map(|s| {
            let (_, length) = spring_frame(state, s);
            0.5 * s.stiffness * (length - s.rest_length).powi(2)
        })
        .sum();

    let model = config.strain_mode.model();
    let tets: f64 = state
        .tets
        .iter()
        .filter(|t| !t.degenerate)
        .map(|t| {
            let f = deformation_gradient(state.tet_positions(t), &t.rest_inv);
            let strain = model.strain(&f);
            let stress = IsotropicElasticity {
                stiffness: t.stiffness,
                poisson: config.poisson,
            }
            .stress(&strain);
            let contraction = stress.x_axis.dot(strain.x_axis)
                + stress.y_axis.dot(strain.y_axis)
                + stress.z_axis.dot(strain.z_axis);
            0.5 * t.rest_volume * contraction
        })
        .sum();

    springs + tets
}

/// Gravitational potential `-Σ m g·x` of free particles.
pub fn gravitational_energy(state: &SimulationState, config: &SolverConfig) -> f64 {
    let g = DVec3::from_array(config.gravity);
    state
        .particles
        .iter()
        .filter(|p| p.is_free())
        .map(|p| -g.dot(p.position) / p.inv_mass)
        .sum()
}

pub fn energy_report(state: &SimulationState, config: &SolverConfig) -> EnergyReport {
    EnergyReport {
        kinetic: kinetic_energy(state),
        elastic: elastic_energy(state, config),
        gravitational: gravitational_energy(state, config),
    }
}
