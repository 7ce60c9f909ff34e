//! # elastica-scene
//!
//! The per-frame orchestrator and the built-in scenes.
//!
//! A frame runs: interaction → integration (force/Jacobian assembly and
//! solve) → ground plane → collision response → stress update. Each
//! frame returns a [`FrameReport`] and emits telemetry events.

pub mod config;
pub mod profile;
pub mod scenes;
pub mod simulation;

pub use config::SimulationConfig;
pub use profile::ProfileInfo;
pub use scenes::{Scene, SceneSetup};
pub use simulation::{FrameReport, Simulation};
