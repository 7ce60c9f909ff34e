//! Linearized backward Euler.
//!
//! Solves `(M - h·∂F/∂v - h²·∂F/∂x) Δv = h (F₀ + h·∂F/∂x·v₀)` and applies
//! `v += Δv`, `x += h·v`. With [`SolverConfig::solve_with_guess`] the
//! unknown is the new velocity itself, seeded with `v₀`:
//!
//! ```text
//! A' v = M v₀ + h F₀ - h ∂F/∂v v₀
//! ```
//!
//! which has the same solution.

use std::time::Instant;

use elastica_math::{
    BlockTriplets, ConjugateGradient, CsrMatrix, DVec3, FaerSolver, SolveReport, SparseSolver,
};
use elastica_types::ElasticaResult;
use tracing::{debug, warn};

use crate::assembly::{assemble_jacobians, DofMap};
use crate::config::{LinearSolverKind, SolverConfig};
use crate::forces::compute_forces;
use crate::state::SimulationState;
use crate::strategy::{Integrator, StepResult};

/// Implicit Euler integrator.
pub struct ImplicitEuler {
    cg: ConjugateGradient,
    cholesky: FaerSolver,
}

impl ImplicitEuler {
    pub fn new() -> Self {
        Self {
            cg: ConjugateGradient::default(),
            cholesky: FaerSolver::new(),
        }
    }

    fn solve(
        &mut self,
        system: &CsrMatrix,
        rhs: &[f64],
        solution: &mut [f64],
        config: &SolverConfig,
    ) -> ElasticaResult<SolveReport> {
        if config.linear_solver == LinearSolverKind::Cholesky {
            match self.cholesky.factorize(system) {
                Ok(()) => return self.cholesky.solve(rhs, solution),
                Err(e) => {
                    warn!(error = %e, "Cholesky factorization failed; falling back to conjugate gradient");
                }
            }
        }
        self.cg.max_iterations = config.max_iterations;
        self.cg.tolerance = config.tolerance;
        self.cg.factorize(system)?;
        self.cg.solve(rhs, solution)
    }
}

impl Default for ImplicitEuler {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator for ImplicitEuler {
    fn step(
        &mut self,
        state: &mut SimulationState,
        config: &SolverConfig,
        dt: f64,
    ) -> ElasticaResult<StepResult> {
        let start = Instant::now();
        state.save_previous();

        let dofs = DofMap::build(state);
        compute_forces(state, config);
        if dofs.is_empty() {
            return Ok(StepResult {
                converged: true,
                wall_time: start.elapsed().as_secs_f64(),
                ..Default::default()
            });
        }
        let jacobians = assemble_jacobians(state, &dofs, config);

        let n = dofs.len();
        let mut v0 = vec![0.0; n * 3];
        let mut f0 = vec![0.0; n * 3];
        let mut system = BlockTriplets::with_capacity(n, n);
        for (slot, &pi) in dofs.free_particles().iter().enumerate() {
            let p = &state.particles[pi];
            v0[slot * 3..slot * 3 + 3].copy_from_slice(&p.velocity.to_array());
            f0[slot * 3..slot * 3 + 3].copy_from_slice(&p.force.to_array());
            let mass = 1.0 / p.inv_mass;
            for axis in 0..3 {
                system.add_diagonal(slot * 3 + axis, mass);
            }
        }
        system.extend_scaled(&jacobians.dfdv, -dt);
        system.extend_scaled(&jacobians.dfdx, -dt * dt);
        let system = system.to_csr();

        let mut rhs = vec![0.0; n * 3];
        let mut solution = vec![0.0; n * 3];
        if config.solve_with_guess {
            let mut damped = vec![0.0; n * 3];
            jacobians.dfdv.to_csr().mul_vec(&v0, &mut damped);
            for (slot, &pi) in dofs.free_particles().iter().enumerate() {
                let mass = 1.0 / state.particles[pi].inv_mass;
                for axis in 0..3 {
                    let i = slot * 3 + axis;
                    rhs[i] = mass * v0[i] + dt * f0[i] - dt * damped[i];
                }
            }
            solution.copy_from_slice(&v0);
        } else {
            let mut kv = vec![0.0; n * 3];
            jacobians.dfdx.to_csr().mul_vec(&v0, &mut kv);
            for ((b, f), k) in rhs.iter_mut().zip(&f0).zip(&kv) {
                *b = dt * (f + dt * k);
            }
        }
        let assembly_time = start.elapsed().as_secs_f64();

        let solve_start = Instant::now();
        let report = self.solve(&system, &rhs, &mut solution, config)?;
        let solve_time = solve_start.elapsed().as_secs_f64();
        if !report.converged {
            debug!(
                iterations = report.iterations,
                residual = report.residual,
                "Linear solve did not converge; using best estimate"
            );
        }

        for (slot, &pi) in dofs.free_particles().iter().enumerate() {
            let x = DVec3::from_slice(&solution[slot * 3..slot * 3 + 3]);
            let p = &mut state.particles[pi];
            p.velocity = if config.solve_with_guess { x } else { p.velocity + x };
            p.position += dt * p.velocity;
        }

        Ok(StepResult {
            iterations: report.iterations,
            final_residual: report.residual,
            converged: report.converged,
            assembly_time,
            solve_time,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }

    fn name(&self) -> &str {
        "implicit_euler"
    }
}
