//! Simulation event types.
//!
//! Events are small value types tagged with the frame they belong to.

use serde::{Deserialize, Serialize};

/// A simulation event emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Frame number (0-indexed).
    pub frame: u64,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// A scene was set up.
    SceneLoaded {
        name: String,
        particles: u32,
        anchors: u32,
        springs: u32,
        tets: u32,
    },

    /// A scene failed to load; the previous one stays active.
    SceneLoadFailed { name: String, reason: String },

    /// Frame started.
    FrameBegin {
        /// Simulated time at the start of the frame (seconds).
        sim_time: f64,
    },

    /// Frame completed.
    FrameEnd {
        /// Wall-clock time for the whole frame (seconds).
        wall_time: f64,
    },

    /// Linear solve report for the frame.
    Convergence {
        iterations: u32,
        final_residual: f64,
        converged: bool,
    },

    /// Collision pass report.
    Collision {
        iterations: u32,
        vertex_face: u32,
        edge_edge: u32,
        corrections: u32,
        resolved: bool,
    },

    /// Energy snapshot after the frame.
    Energy {
        kinetic: f64,
        elastic: f64,
        gravitational: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl EventKind {
    /// Every kind name, in declaration order.
    pub const NAMES: [&'static str; 8] = [
        "scene_loaded",
        "scene_load_failed",
        "frame_begin",
        "frame_end",
        "convergence",
        "collision",
        "energy",
        "custom",
    ];

    /// Stable snake_case name, used for muting and counting.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SceneLoaded { .. } => "scene_loaded",
            Self::SceneLoadFailed { .. } => "scene_load_failed",
            Self::FrameBegin { .. } => "frame_begin",
            Self::FrameEnd { .. } => "frame_end",
            Self::Convergence { .. } => "convergence",
            Self::Collision { .. } => "collision",
            Self::Energy { .. } => "energy",
            Self::Custom { .. } => "custom",
        }
    }
}

impl SimulationEvent {
    /// Creates a new event for the given frame.
    pub fn new(frame: u64, kind: EventKind) -> Self {
        Self { frame, kind }
    }
}
