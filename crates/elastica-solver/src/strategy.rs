//! Integrator trait, the abstraction for time stepping.
//!
//! Every integrator advances a [`SimulationState`] by one step under a
//! [`SolverConfig`] handed in per call, so modes can change between frames.

use elastica_types::ElasticaResult;

use crate::config::{IntegratorKind, SolverConfig};
use crate::explicit::{ExplicitEuler, MidpointEuler};
use crate::implicit::ImplicitEuler;
use crate::state::SimulationState;

/// Result of an integrator step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepResult {
    /// Linear solver iterations (0 for explicit schemes).
    pub iterations: u32,
    /// Final relative residual of the linear solve.
    pub final_residual: f64,
    /// Whether the linear solve reached tolerance.
    pub converged: bool,
    /// Seconds spent accumulating forces and Jacobians.
    pub assembly_time: f64,
    /// Seconds spent in the linear solver.
    pub solve_time: f64,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// Trait for time integration schemes.
///
/// ```text
/// loop {
///     integrator.step(state, config, dt)?;
/// }
/// ```
pub trait Integrator: Send {
    /// Advances positions and velocities of free particles by `dt`.
    ///
    /// Anchors are left untouched. Linear solver non-convergence is not an
    /// error; the best available estimate is applied.
    fn step(
        &mut self,
        state: &mut SimulationState,
        config: &SolverConfig,
        dt: f64,
    ) -> ElasticaResult<StepResult>;

    /// Returns the integrator's name.
    fn name(&self) -> &str;
}

/// Creates the integrator selected by `kind`.
pub fn create_integrator(kind: IntegratorKind) -> Box<dyn Integrator> {
    match kind {
        IntegratorKind::Implicit => Box::new(ImplicitEuler::new()),
        IntegratorKind::Explicit => Box::new(ExplicitEuler::new()),
        IntegratorKind::Midpoint => Box::new(MidpointEuler::new()),
    }
}
