//! Frame orchestrator.
//!
//! Owns the state, the integrator, the collision oracle, the interaction
//! state, and the telemetry bus. One [`Simulation::step_frame`] call runs a
//! whole frame to completion.

use std::time::Instant;

use elastica_contact::{BruteForceOracle, CollisionOracle, CollisionReport, CollisionResponse, GroundPlane};
use elastica_math::DVec3;
use elastica_render::{CameraFrame, RenderFrame};
use elastica_solver::energy::{energy_report, EnergyReport};
use elastica_solver::strategy::create_integrator;
use elastica_solver::stress::update_stress;
use elastica_solver::{
    Integrator, IntegratorKind, Interaction, MouseSpring, SimulationState, SolverConfig, StepResult,
};
use elastica_telemetry::{EventBus, EventKind};
use elastica_types::{ElasticaResult, ParticleRef};
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::profile::ProfileInfo;
use crate::scenes::Scene;

/// Rest length of mouse springs.
const MOUSE_REST_LENGTH: f64 = 6.0;
/// Where the mouse handle appears before the first move.
const MOUSE_HANDLE_START: DVec3 = DVec3::new(0.5, 0.5, 0.0);

/// Summary of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    /// Simulated time at the end of the frame.
    pub sim_time: f64,
    pub step: StepResult,
    pub collision: CollisionReport,
    /// Particles clamped by the ground plane.
    pub ground_contacts: u32,
    pub energy: EnergyReport,
    /// Wall-clock time for the whole frame (seconds).
    pub wall_time: f64,
}

/// A running simulation.
pub struct Simulation {
    config: SimulationConfig,
    state: SimulationState,
    integrator: Box<dyn Integrator>,
    integrator_kind: IntegratorKind,
    oracle: Box<dyn CollisionOracle>,
    interaction: Interaction,
    mouse: MouseSpring,
    bus: EventBus,
    scene_name: String,
    scene_gravity: bool,
    scene_ground: Option<f64>,
    frame: u64,
    time: f64,
    profile: ProfileInfo,
}

impl Simulation {
    /// Creates an empty simulation using the brute-force oracle.
    pub fn new(config: SimulationConfig) -> ElasticaResult<Self> {
        config.validate()?;
        let oracle = Box::new(BruteForceOracle::new(config.collision_thickness));
        Ok(Self::with_oracle(config, oracle))
    }

    /// Creates an empty simulation with a caller-supplied collision oracle.
    /// The configuration is assumed valid.
    pub fn with_oracle(config: SimulationConfig, oracle: Box<dyn CollisionOracle>) -> Self {
        let integrator_kind = config.solver.integrator;
        Self {
            integrator: create_integrator(integrator_kind),
            integrator_kind,
            config,
            state: SimulationState::new(),
            oracle,
            interaction: Interaction::new(),
            mouse: MouseSpring::starting_at(MOUSE_HANDLE_START),
            bus: EventBus::new(),
            scene_name: String::new(),
            scene_gravity: true,
            scene_ground: None,
            frame: 0,
            time: 0.0,
            profile: ProfileInfo::default(),
        }
    }

    /// Replaces the whole system with `scene`.
    ///
    /// On failure the previous system stays in place and the error is
    /// returned after a `SceneLoadFailed` event.
    pub fn load_scene(&mut self, scene: &Scene) -> ElasticaResult<()> {
        let name = scene.name();
        let setup = match scene.build(&self.config) {
            Ok(setup) => setup,
            Err(e) => {
                warn!(scene = %name, error = %e, "Scene setup failed; keeping previous scene");
                self.bus.record(EventKind::SceneLoadFailed {
                    name,
                    reason: e.to_string(),
                });
                self.bus.end_frame();
                return Err(e);
            }
        };

        self.state = setup.state;
        self.scene_gravity = setup.gravity;
        self.scene_ground = setup.ground_height;
        self.scene_name = name;
        self.interaction = Interaction::new();
        self.mouse = MouseSpring::starting_at(MOUSE_HANDLE_START);
        self.frame = 0;
        self.time = 0.0;
        self.profile.reset();
        self.reinit_oracle();
        self.bus.begin_frame(self.frame);

        info!(
            scene = %self.scene_name,
            particles = self.state.particles.len(),
            springs = self.state.springs.len(),
            tets = self.state.tets.len(),
            "Scene loaded"
        );
        self.bus.record(EventKind::SceneLoaded {
            name: self.scene_name.clone(),
            particles: self.state.particles.len() as u32,
            anchors: self.state.anchors.len() as u32,
            springs: self.state.springs.len() as u32,
            tets: self.state.tets.len() as u32,
        });
        self.bus.end_frame();
        Ok(())
    }

    /// Replaces the state directly, e.g. for a hand-built system.
    pub fn set_state(&mut self, state: SimulationState) {
        self.state = state;
        self.scene_name = "custom".into();
        self.scene_gravity = true;
        self.scene_ground = None;
        self.interaction = Interaction::new();
        self.mouse = MouseSpring::starting_at(MOUSE_HANDLE_START);
        self.reinit_oracle();
    }

    fn reinit_oracle(&mut self) {
        CollisionResponse::from_config(&self.config.solver).init_oracle(self.oracle.as_mut(), &self.state);
    }

    /// Solver settings with the scene's gravity and ground applied.
    pub fn effective_solver_config(&self) -> SolverConfig {
        let mut solver = self.config.solver.clone();
        if !self.scene_gravity {
            solver.gravity = [0.0; 3];
        }
        if solver.ground_height.is_none() {
            solver.ground_height = self.scene_ground;
        }
        solver
    }

    /// Advances one frame.
    pub fn step_frame(&mut self) -> ElasticaResult<FrameReport> {
        let start = Instant::now();
        let dt = self.config.dt;
        let solver = self.effective_solver_config();
        self.bus.begin_frame(self.frame);
        self.bus.record(EventKind::FrameBegin { sim_time: self.time });

        if solver.integrator != self.integrator_kind {
            debug!(from = ?self.integrator_kind, to = ?solver.integrator, "Switching integrator");
            self.integrator = create_integrator(solver.integrator);
            self.integrator_kind = solver.integrator;
        }

        self.state.clear_marks();
        self.interaction.apply(&mut self.state, &solver, dt);
        let step = self.integrator.step(&mut self.state, &solver, dt)?;

        let ground_contacts = solver
            .ground_height
            .map_or(0, |h| GroundPlane::new(h).resolve(&mut self.state));

        let collision_start = Instant::now();
        let collision = if self.config.collisions {
            CollisionResponse::from_config(&solver).resolve(self.oracle.as_mut(), &mut self.state)
        } else {
            CollisionReport {
                resolved: true,
                ..Default::default()
            }
        };
        let collision_time = collision_start.elapsed().as_secs_f64();

        update_stress(&mut self.state, &solver);

        if !self.state.is_finite() {
            warn!(frame = self.frame, "Non-finite particle state after frame");
        }

        self.time += dt;
        let energy = if self.config.track_energy {
            energy_report(&self.state, &solver)
        } else {
            EnergyReport::default()
        };

        self.bus.record(EventKind::Convergence {
            iterations: step.iterations,
            final_residual: step.final_residual,
            converged: step.converged,
        });
        self.bus.record(EventKind::Collision {
            iterations: collision.iterations,
            vertex_face: collision.vertex_face_contacts,
            edge_edge: collision.edge_edge_contacts,
            corrections: collision.corrections,
            resolved: collision.resolved,
        });
        if self.config.track_energy {
            self.bus.record(EventKind::Energy {
                kinetic: energy.kinetic,
                elastic: energy.elastic,
                gravitational: energy.gravitational,
            });
        }

        let wall_time = start.elapsed().as_secs_f64();
        self.bus.record(EventKind::FrameEnd { wall_time });
        self.bus.end_frame();

        self.profile.frames += 1;
        self.profile.assembly_time += step.assembly_time;
        self.profile.solve_time += step.solve_time;
        self.profile.collision_time += collision_time;
        self.profile.frame_time += wall_time;

        let report = FrameReport {
            frame: self.frame,
            sim_time: self.time,
            step,
            collision,
            ground_contacts,
            energy,
            wall_time,
        };
        self.frame += 1;
        Ok(report)
    }

    /// Runs `frames` frames and returns their reports.
    pub fn run(&mut self, frames: u64) -> ElasticaResult<Vec<FrameReport>> {
        (0..frames).map(|_| self.step_frame()).collect()
    }

    // ─── Interaction ──────────────────────────────────────────

    /// Picks the surface particle under a ray.
    pub fn pick(&mut self, origin: DVec3, dir: DVec3) -> Option<ParticleRef> {
        self.interaction.pick(&self.state, origin, dir)
    }

    /// Moves the drag target along a new ray.
    pub fn drag(&mut self, origin: DVec3, dir: DVec3) {
        self.interaction.drag(&self.state, origin, dir);
    }

    pub fn release(&mut self) {
        self.interaction.release();
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Ties particle `to` to the mouse handle with the default spring
    /// constants.
    pub fn attach_mouse_spring(&mut self, to: ParticleRef) -> ParticleRef {
        let (k, c) = (self.config.solver.stiffness, self.config.solver.damping);
        self.mouse.attach(&mut self.state, to, MOUSE_REST_LENGTH, k, c)
    }

    /// Enables mouse springs with the default constants, or slackens them.
    pub fn set_mouse_spring(&mut self, enabled: bool) {
        let (k, c) = (self.config.solver.stiffness, self.config.solver.damping);
        self.mouse.set_enabled(&mut self.state, enabled, k, c);
    }

    pub fn set_mouse_pos(&mut self, position: DVec3) {
        self.mouse.set_position(&mut self.state, position);
    }

    // ─── Topology edits ───────────────────────────────────────

    /// Adds a spring with the default constants; rest length from the
    /// current distance.
    pub fn add_spring(&mut self, to: ParticleRef, from: ParticleRef) -> usize {
        let (k, c) = (self.config.solver.stiffness, self.config.solver.damping);
        self.state.add_spring(to, from, k, c)
    }

    /// Sets the constants used by later [`Simulation::add_spring`] and
    /// mouse spring calls. Existing springs keep theirs.
    pub fn set_spring_properties(&mut self, stiffness: f64, damping: f64) {
        self.config.solver.stiffness = stiffness;
        self.config.solver.damping = damping;
    }

    // ─── Queries ──────────────────────────────────────────────

    /// Camera framing every point except the mouse handle.
    pub fn camera(&self) -> CameraFrame {
        CameraFrame::fit(&self.state, self.mouse.handle())
    }

    /// Display buffers of the current state.
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame::capture(
            self.frame,
            &self.state,
            self.config.strain_scale,
            self.config.stress_scale,
        )
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Mutable state access. Call [`Simulation::set_state`] instead when the
    /// surface changes, so the oracle is rebuilt.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replaces the configuration after validating it.
    pub fn set_config(&mut self, config: SimulationConfig) -> ElasticaResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn scene_name(&self) -> &str {
        &self.scene_name
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn profile(&self) -> &ProfileInfo {
        &self.profile
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }
}
