//! Explicit integrators for stiff-free scenes and comparisons.

use std::time::Instant;

use elastica_math::DVec3;
use elastica_types::ElasticaResult;

use crate::config::SolverConfig;
use crate::forces::compute_forces;
use crate::state::SimulationState;
use crate::strategy::{Integrator, StepResult};

/// Symplectic Euler: `v += h·F/m`, then `x += h·v`.
pub struct ExplicitEuler;

impl ExplicitEuler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExplicitEuler {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator for ExplicitEuler {
    fn step(
        &mut self,
        state: &mut SimulationState,
        config: &SolverConfig,
        dt: f64,
    ) -> ElasticaResult<StepResult> {
        let start = Instant::now();
        state.save_previous();
        compute_forces(state, config);
        let assembly_time = start.elapsed().as_secs_f64();

        for p in state.particles.iter_mut().filter(|p| p.is_free()) {
            p.velocity += dt * p.force * p.inv_mass;
            p.position += dt * p.velocity;
        }

        Ok(StepResult {
            converged: true,
            assembly_time,
            wall_time: start.elapsed().as_secs_f64(),
            ..Default::default()
        })
    }

    fn name(&self) -> &str {
        "explicit_euler"
    }
}

/// Two-stage explicit midpoint. A symplectic half step locates the
/// midpoint; the start state then takes a full symplectic step with the
/// midpoint forces.
pub struct MidpointEuler;

impl MidpointEuler {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MidpointEuler {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator for MidpointEuler {
    fn step(
        &mut self,
        state: &mut SimulationState,
        config: &SolverConfig,
        dt: f64,
    ) -> ElasticaResult<StepResult> {
        let start = Instant::now();
        state.save_previous();
        let half = 0.5 * dt;

        compute_forces(state, config);
        let start_velocity: Vec<DVec3> = state.particles.iter().map(|p| p.velocity).collect();
        for p in state.particles.iter_mut().filter(|p| p.is_free()) {
            p.velocity += half * p.force * p.inv_mass;
            p.position += half * p.velocity;
        }

        compute_forces(state, config);
        let assembly_time = start.elapsed().as_secs_f64();
        for (p, v0) in state.particles.iter_mut().zip(start_velocity) {
            if !p.is_free() {
                continue;
            }
            p.velocity = v0 + dt * p.force * p.inv_mass;
            p.position = p.previous_position + dt * p.velocity;
        }

        Ok(StepResult {
            converged: true,
            assembly_time,
            wall_time: start.elapsed().as_secs_f64(),
            ..Default::default()
        })
    }

    fn name(&self) -> &str {
        "midpoint"
    }
}
