//! JSON frame exporter.
//!
//! Records every submitted frame's buffers and writes the whole sequence
//! to one JSON file on `finalize()`.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use elastica_solver::SimulationState;
use elastica_types::{ElasticaError, ElasticaResult};

use crate::renderer::{RenderFrame, Renderer};

#[derive(Serialize)]
struct FrameData {
    frame: u64,
    lines: Vec<f32>,
    line_colors: Vec<f32>,
    triangles: Vec<f32>,
    triangle_colors: Vec<f32>,
}

#[derive(Serialize)]
struct AnimationData {
    particle_count: usize,
    anchor_count: usize,
    spring_count: usize,
    face_count: usize,
    frames: Vec<FrameData>,
}

/// Exports simulation frames to a JSON file.
///
/// ```text
/// let mut exporter = JsonFrameExporter::new("output.json");
/// exporter.init(&state)?;
/// // ... submit_frame() each frame ...
/// exporter.finalize()?;
/// ```
pub struct JsonFrameExporter {
    output_path: PathBuf,
    counts: [usize; 4],
    frames: Vec<FrameData>,
    submitted: u32,
}

impl JsonFrameExporter {
    /// Creates a new exporter that will write to the given path.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            counts: [0; 4],
            frames: Vec::new(),
            submitted: 0,
        }
    }
}

impl Renderer for JsonFrameExporter {
    fn init(&mut self, state: &SimulationState) -> ElasticaResult<()> {
        self.counts = [
            state.particles.len(),
            state.anchors.len(),
            state.springs.len(),
            state.faces.len(),
        ];
        self.frames.clear();
        Ok(())
    }

    fn submit_frame(&mut self, frame: &RenderFrame) -> ElasticaResult<()> {
        self.frames.push(FrameData {
            frame: frame.frame,
            lines: frame.lines.clone(),
            line_colors: frame.line_colors.clone(),
            triangles: frame.triangles.clone(),
            triangle_colors: frame.triangle_colors.clone(),
        });
        self.submitted += 1;
        Ok(())
    }

    fn finalize(&mut self) -> ElasticaResult<()> {
        let [particle_count, anchor_count, spring_count, face_count] = self.counts;
        let data = AnimationData {
            particle_count,
            anchor_count,
            spring_count,
            face_count,
            frames: std::mem::take(&mut self.frames),
        };
        let json = serde_json::to_string(&data)
            .map_err(|e| ElasticaError::Serialization(format!("JSON serialization failed: {e}")))?;
        std::fs::write(&self.output_path, json)?;
        info!(path = %self.output_path.display(), frames = data.frames.len(), "Wrote frame export");
        Ok(())
    }

    fn name(&self) -> &str {
        "json_exporter"
    }

    fn frame_count(&self) -> u32 {
        self.submitted
    }
}
