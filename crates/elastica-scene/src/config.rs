//! Simulation configuration: frame settings plus the solver section.

use std::path::Path;

use serde::{Deserialize, Serialize};

use elastica_solver::SolverConfig;
use elastica_types::constants;
use elastica_types::{ElasticaError, ElasticaResult};

/// Everything a [`Simulation`](crate::Simulation) needs besides the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Time step per frame (seconds).
    pub dt: f64,

    /// Multiplier on spring strain before colouring.
    pub strain_scale: f64,

    /// Multiplier on element stress before colouring.
    pub stress_scale: f64,

    /// Run the collision response pass.
    pub collisions: bool,

    /// Depth band of the built-in collision oracle.
    pub collision_thickness: f64,

    /// Emit an energy event each frame.
    pub track_energy: bool,

    /// Solver section.
    pub solver: SolverConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: constants::DEFAULT_DT,
            strain_scale: 10.0,
            stress_scale: 0.01,
            collisions: true,
            collision_thickness: 0.1,
            track_energy: true,
            solver: SolverConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Explicit midpoint stepping at a smaller time step.
    pub fn explicit() -> Self {
        Self {
            dt: 0.001,
            solver: SolverConfig::explicit(),
            ..Default::default()
        }
    }

    /// Tighter solve and more collision rounds.
    pub fn high_quality() -> Self {
        Self {
            solver: SolverConfig::high_quality(),
            ..Default::default()
        }
    }

    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> ElasticaResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| ElasticaError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a TOML file.
    pub fn load(path: &Path) -> ElasticaResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> ElasticaResult<String> {
        toml::to_string_pretty(self).map_err(|e| ElasticaError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> ElasticaResult<()> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(ElasticaError::InvalidConfig(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        if self.collision_thickness < 0.0 {
            return Err(ElasticaError::InvalidConfig(
                "collision_thickness must be non-negative".into(),
            ));
        }
        self.solver.validate()
    }
}
