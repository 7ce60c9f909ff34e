//! Built-in scenes.
//!
//! Spring scenes live in the `z = 0` plane. Every build produces a fresh
//! [`SimulationState`]; nothing carries over from the previous scene.

use std::path::PathBuf;

use elastica_math::DVec3;
use elastica_mesh::generators::bar;
use elastica_mesh::io::try_load_json;
use elastica_solver::SimulationState;
use elastica_types::{ElasticaError, ElasticaResult};

use crate::config::SimulationConfig;

/// Stiffness of the bending bar's elements.
const BAR_STIFFNESS: f64 = 2.0e5;
/// Damping of the bending bar's elements.
const BAR_DAMPING: f64 = 50.0;

/// A scene preset.
#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    /// Two particles on a short spring, flying apart sideways.
    SingleSpring,
    /// Three particles joined in a triangle, resting on the ground.
    Triangle,
    /// Six-particle truss hanging from one anchor.
    Triforce,
    /// Two-row truss between two anchors, `length` top-row particles.
    Bridge { length: usize },
    /// Straight spring chain from an anchor at the origin.
    Chain { links: usize },
    /// Tetrahedral bar clamped at `x = 0`, bending under gravity.
    BendingBar { segments: usize },
    /// Tetrahedral mesh loaded from JSON, clamped at its minimum `x`.
    MeshFile(PathBuf),
}

/// What a scene build hands to the simulation.
#[derive(Debug, Clone)]
pub struct SceneSetup {
    pub state: SimulationState,
    /// False switches gravity off for this scene.
    pub gravity: bool,
    /// Ground plane height, if the scene has one.
    pub ground_height: Option<f64>,
}

impl Scene {
    /// Names accepted by [`Scene::from_name`].
    pub const NAMES: [&'static str; 6] = [
        "single_spring",
        "triangle",
        "triforce",
        "bridge",
        "chain",
        "bending_bar",
    ];

    /// Looks up a preset by name. Names ending in `.json` load a mesh file.
    pub fn from_name(name: &str) -> ElasticaResult<Self> {
        match name {
            "single_spring" => Ok(Self::SingleSpring),
            "triangle" => Ok(Self::Triangle),
            "triforce" => Ok(Self::Triforce),
            "bridge" => Ok(Self::Bridge { length: 10 }),
            "chain" => Ok(Self::Chain { links: 10 }),
            "bending_bar" => Ok(Self::BendingBar { segments: 6 }),
            path if path.ends_with(".json") => Ok(Self::MeshFile(PathBuf::from(path))),
            other => Err(ElasticaError::UnknownScene(other.to_string())),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Self::SingleSpring => "single_spring".into(),
            Self::Triangle => "triangle".into(),
            Self::Triforce => "triforce".into(),
            Self::Bridge { .. } => "bridge".into(),
            Self::Chain { .. } => "chain".into(),
            Self::BendingBar { .. } => "bending_bar".into(),
            Self::MeshFile(path) => path.display().to_string(),
        }
    }

    /// Builds the scene with the configured default stiffness and damping.
    pub fn build(&self, config: &SimulationConfig) -> ElasticaResult<SceneSetup> {
        let k = config.solver.stiffness;
        let c = config.solver.damping;
        let mut state = SimulationState::new();
        let mut gravity = true;
        let mut ground_height = None;

        match self {
            Self::SingleSpring => {
                let a = state.add_particle(DVec3::ZERO, DVec3::new(-1.0, 0.0, 0.0), 1.0);
                let b = state.add_particle(DVec3::new(0.0, 0.1, 0.0), DVec3::X, 1.0);
                state.add_spring_with_rest(a, b, k, c, 0.1);
                gravity = false;
            }
            Self::Triangle => {
                let p = [
                    state.add_particle(DVec3::ZERO, DVec3::ZERO, 1.0),
                    state.add_particle(DVec3::X, DVec3::ZERO, 1.0),
                    state.add_particle(DVec3::new(1.0, 1.0, 0.0), DVec3::ZERO, 1.0),
                ];
                state.add_spring(p[0], p[1], k, c);
                state.add_spring(p[0], p[2], k, c);
                state.add_spring(p[1], p[2], k, c);
                gravity = false;
                ground_height = Some(0.0);
            }
            Self::Triforce => {
                let coords = [
                    (20.0, 10.0),
                    (17.5, 12.5),
                    (22.5, 12.5),
                    (15.0, 15.0),
                    (20.0, 15.0),
                    (25.0, 15.0),
                ];
                let p: Vec<_> = coords
                    .iter()
                    .map(|&(x, y)| state.add_particle(DVec3::new(x, y, 0.0), DVec3::ZERO, 1.0))
                    .collect();
                for (to, from) in [(0, 1), (0, 2), (1, 2), (1, 3), (1, 4), (2, 4), (2, 5), (3, 4), (4, 5)] {
                    state.add_spring_with_rest(p[to], p[from], k, c, 5.0);
                }
                let anchor = state.add_anchor(DVec3::ZERO);
                state.add_spring(p[5], anchor, k, c);
            }
            Self::Bridge { length } => build_bridge(&mut state, *length, k, c)?,
            Self::Chain { links } => {
                if *links == 0 {
                    return Err(ElasticaError::InvalidTopology("chain needs at least one link".into()));
                }
                let mut prev = state.add_anchor(DVec3::ZERO);
                for i in 1..=*links {
                    let p = state.add_particle(DVec3::new(i as f64, 0.0, 0.0), DVec3::ZERO, 1.0);
                    state.add_spring(p, prev, k, c);
                    prev = p;
                }
            }
            Self::BendingBar { segments } => {
                if *segments == 0 {
                    return Err(ElasticaError::InvalidTopology("bar needs at least one segment".into()));
                }
                let mesh = bar(*segments, 1, 1, 1.0, DVec3::ZERO);
                state = SimulationState::from_tet_mesh(&mesh, 1.0, BAR_STIFFNESS, BAR_DAMPING, |_, p| {
                    p.x == 0.0
                })?;
            }
            Self::MeshFile(path) => {
                let mesh = try_load_json(path)?;
                let min_x = mesh.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
                state = SimulationState::from_tet_mesh(&mesh, 1.0, k, c, |_, p| {
                    (p.x - min_x).abs() < 1e-9
                })?;
            }
        }

        Ok(SceneSetup {
            state,
            gravity,
            ground_height,
        })
    }
}

/// Top row of `length` particles, bottom row of `length + 1`, anchored at
/// both ends and braced diagonally.
fn build_bridge(state: &mut SimulationState, length: usize, k: f64, c: f64) -> ElasticaResult<()> {
    if length < 2 {
        return Err(ElasticaError::InvalidTopology("bridge needs at least two spans".into()));
    }
    let span = 4.0;
    let left = state.add_anchor(DVec3::new(-span, 0.0, 0.0));
    let right = state.add_anchor(DVec3::new(length as f64 * span, 0.0, 0.0));

    let top: Vec<_> = (0..length)
        .map(|i| state.add_particle(DVec3::new(i as f64 * span, 0.0, 0.0), DVec3::ZERO, 1.0))
        .collect();
    let bottom: Vec<_> = (0..=length)
        .map(|i| {
            state.add_particle(DVec3::new(i as f64 * span - span / 2.0, -span, 0.0), DVec3::ZERO, 1.0)
        })
        .collect();

    state.add_spring(top[0], left, k, c);
    state.add_spring(top[length - 1], right, k, c);
    state.add_spring(bottom[0], left, k, c);
    state.add_spring(bottom[length], right, k, c);

    for pair in top.windows(2) {
        state.add_spring(pair[0], pair[1], k, c);
    }
    for pair in bottom.windows(2) {
        state.add_spring(pair[0], pair[1], k, c);
    }
    for i in 0..length {
        state.add_spring(bottom[i], top[i], k, c);
        state.add_spring(top[i], bottom[i + 1], k, c);
    }
    Ok(())
}
