//! Renderer trait and HeadlessRenderer stub.
//!
//! The renderer is called once per frame with the display buffers of the
//! current state.

use elastica_solver::SimulationState;
use elastica_types::ElasticaResult;

use crate::buffers;

/// Display buffers for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderFrame {
    /// Frame this data corresponds to.
    pub frame: u64,
    /// Spring line segments.
    pub lines: Vec<f32>,
    /// Spring line colours.
    pub line_colors: Vec<f32>,
    /// Surface triangles.
    pub triangles: Vec<f32>,
    /// Surface colours.
    pub triangle_colors: Vec<f32>,
}

impl RenderFrame {
    /// Captures the current state. Strain colours use `strain_scale` for
    /// springs and `stress_scale` for surfaces.
    pub fn capture(frame: u64, state: &SimulationState, strain_scale: f64, stress_scale: f64) -> Self {
        Self {
            frame,
            lines: buffers::spring_positions(state),
            line_colors: buffers::spring_colors(state, strain_scale),
            triangles: buffers::surface_positions(state),
            triangle_colors: buffers::surface_stress_colors(state, stress_scale),
        }
    }
}

/// Trait for consuming simulation output.
///
/// # Implementations
/// - [`HeadlessRenderer`] discards frames
/// - [`JsonFrameExporter`](crate::JsonFrameExporter) writes them to a JSON file
pub trait Renderer: Send {
    /// Called once after a scene is set up.
    fn init(&mut self, state: &SimulationState) -> ElasticaResult<()>;

    /// Submit a frame.
    fn submit_frame(&mut self, frame: &RenderFrame) -> ElasticaResult<()>;

    /// Flush buffers, close files, etc.
    fn finalize(&mut self) -> ElasticaResult<()>;

    /// Returns the renderer name.
    fn name(&self) -> &str;

    /// Returns the number of frames submitted.
    fn frame_count(&self) -> u32;
}

/// Headless renderer that discards all frames.
pub struct HeadlessRenderer {
    frames: u32,
}

impl HeadlessRenderer {
    /// Creates a new headless renderer.
    pub fn new() -> Self {
        Self { frames: 0 }
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for HeadlessRenderer {
    fn init(&mut self, _state: &SimulationState) -> ElasticaResult<()> {
        Ok(())
    }

    fn submit_frame(&mut self, _frame: &RenderFrame) -> ElasticaResult<()> {
        self.frames += 1;
        Ok(())
    }

    fn finalize(&mut self) -> ElasticaResult<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "headless"
    }

    fn frame_count(&self) -> u32 {
        self.frames
    }
}
