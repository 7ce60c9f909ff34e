//! # elastica-render
//!
//! Turns a [`SimulationState`](elastica_solver::SimulationState) into
//! flat `f32` buffers for drawing: spring line segments, surface
//! triangles, and per-vertex colours from the strain colour ramp. Also
//! frames a camera around the scene.
//!
//! A [`Renderer`] trait receives one [`RenderFrame`] per simulated frame.
//! [`HeadlessRenderer`] discards them; [`JsonFrameExporter`] records them
//! to a JSON file.

pub mod buffers;
pub mod camera;
pub mod color;
pub mod json_exporter;
pub mod renderer;

pub use camera::CameraFrame;
pub use color::strain_color;
pub use json_exporter::JsonFrameExporter;
pub use renderer::{HeadlessRenderer, RenderFrame, Renderer};
