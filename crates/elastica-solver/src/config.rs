//! Solver configuration.
//!
//! Every mode flag (integrator choice, strain measure, solve formulation,
//! ground response) lives in one value handed to the integrator each step.

use serde::{Deserialize, Serialize};

use elastica_material::StrainMode;
use elastica_types::constants;
use elastica_types::{ElasticaError, ElasticaResult};

/// Time integration scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    /// Linearized backward Euler solved with a sparse linear solver.
    #[default]
    Implicit,
    /// Single symplectic Euler sub-step.
    Explicit,
    /// Two-stage explicit midpoint.
    Midpoint,
}

/// Linear solver used by the implicit integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinearSolverKind {
    /// Jacobi-preconditioned conjugate gradient.
    #[default]
    ConjugateGradient,
    /// Sparse Cholesky; falls back to conjugate gradient if the system is
    /// not positive definite.
    Cholesky,
}

/// How a dragged particle follows the pick ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// Spring-like force toward the target, applied as an impulse.
    #[default]
    Force,
    /// Blend the particle's velocity toward the one that reaches the target.
    VelocityBlend,
}

/// Configuration for the simulation solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Integration scheme.
    pub integrator: IntegratorKind,

    /// Solve for the absolute new velocity (with the current velocity as
    /// initial guess) instead of the velocity change.
    pub solve_with_guess: bool,

    /// Strain measure for tetrahedral elements.
    pub strain_mode: StrainMode,

    /// Linear solver for the implicit step.
    pub linear_solver: LinearSolverKind,

    /// Maximum linear solver iterations per step.
    pub max_iterations: u32,

    /// Relative residual tolerance of the linear solver.
    pub tolerance: f64,

    /// Gravity acceleration vector.
    pub gravity: [f64; 3],

    /// Stiffness given to newly created springs and elements.
    pub stiffness: f64,

    /// Damping given to newly created springs and elements.
    pub damping: f64,

    /// Volume-conservation coefficient of tetrahedral elements.
    pub poisson: f64,

    /// Optional ground plane height (Y). Particles below are clamped and bounced.
    pub ground_height: Option<f64>,

    /// Distance a collision-corrected vertex is pushed past the face plane.
    pub collision_margin: f64,

    /// Cap on collision re-query rounds per frame.
    pub collision_max_iterations: u32,

    /// Stiffness of the drag interaction.
    pub interaction_stiffness: f64,

    /// Drag response.
    pub drag_mode: DragMode,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            integrator: IntegratorKind::Implicit,
            solve_with_guess: true,
            strain_mode: StrainMode::Corotational,
            linear_solver: LinearSolverKind::ConjugateGradient,
            max_iterations: constants::DEFAULT_CG_ITERATIONS,
            tolerance: constants::DEFAULT_CG_TOLERANCE,
            gravity: [0.0, -constants::GRAVITY, 0.0],
            stiffness: constants::DEFAULT_STIFFNESS,
            damping: constants::DEFAULT_DAMPING,
            poisson: constants::DEFAULT_POISSON,
            ground_height: None,
            collision_margin: constants::DEFAULT_COLLISION_MARGIN,
            collision_max_iterations: constants::DEFAULT_COLLISION_ITERATIONS,
            interaction_stiffness: 50.0,
            drag_mode: DragMode::Force,
        }
    }
}

impl SolverConfig {
    /// Explicit midpoint stepping, as used for the plain spring scenes.
    pub fn explicit() -> Self {
        Self {
            integrator: IntegratorKind::Midpoint,
            ..Default::default()
        }
    }

    /// Tighter solve, Cholesky first.
    pub fn high_quality() -> Self {
        Self {
            linear_solver: LinearSolverKind::Cholesky,
            max_iterations: 1000,
            tolerance: 1e-12,
            collision_max_iterations: 8,
            ..Default::default()
        }
    }

    /// Same configuration with gravity switched off.
    pub fn without_gravity(mut self) -> Self {
        self.gravity = [0.0; 3];
        self
    }

    /// Checks ranges that would make the step undefined.
    pub fn validate(&self) -> ElasticaResult<()> {
        if !(0.0..0.5).contains(&self.poisson) {
            return Err(ElasticaError::InvalidConfig(format!(
                "poisson must be in [0, 0.5), got {}",
                self.poisson
            )));
        }
        if self.tolerance <= 0.0 {
            return Err(ElasticaError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if self.stiffness < 0.0 || self.damping < 0.0 {
            return Err(ElasticaError::InvalidConfig(
                "stiffness and damping must be non-negative".into(),
            ));
        }
        if self.collision_margin < 0.0 {
            return Err(ElasticaError::InvalidConfig(
                "collision_margin must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
