//! # elastica-solver
//!
//! Topology store, force/Jacobian assembly, and time integration.
//!
//! ## Key Types
//!
//! - [`SimulationState`]: owns particles, anchors, springs, tetrahedra, and surface faces
//! - [`BoundaryMap`]: compact list of surface points for collision queries
//! - [`Integrator`]: pluggable time stepping ([`ImplicitEuler`], [`ExplicitEuler`], [`MidpointEuler`])
//! - [`SolverConfig`]: every mode flag and parameter in one value
//! - [`Interaction`]: ray picking and dragging of a single particle

pub mod assembly;
pub mod boundary;
pub mod config;
pub mod elements;
pub mod energy;
pub mod explicit;
pub mod forces;
pub mod implicit;
pub mod interaction;
pub mod state;
pub mod strategy;
pub mod stress;

pub use boundary::BoundaryMap;
pub use config::{DragMode, IntegratorKind, LinearSolverKind, SolverConfig};
pub use elements::{Spring, TetElement};
pub use energy::EnergyReport;
pub use explicit::{ExplicitEuler, MidpointEuler};
pub use implicit::ImplicitEuler;
pub use interaction::{Interaction, MouseSpring};
pub use state::{Anchor, Particle, SimulationState};
pub use strategy::{create_integrator, Integrator, StepResult};
