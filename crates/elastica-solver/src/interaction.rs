//! User interaction: ray picking, dragging, and the 2D mouse spring.

use elastica_math::DVec3;
use elastica_types::constants::DEGENERATE_THRESHOLD;
use elastica_types::ParticleRef;
use tracing::debug;

use crate::config::{DragMode, SolverConfig};
use crate::state::SimulationState;

/// Ray/triangle intersection (Möller–Trumbore).
///
/// Returns `(t, u, v)` with hit point `origin + t·dir` and barycentric
/// weights `(1 - u - v, u, v)` of the three corners.
pub fn ray_triangle(origin: DVec3, dir: DVec3, tri: [DVec3; 3]) -> Option<(f64, f64, f64)> {
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < DEGENERATE_THRESHOLD {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t > 0.0).then_some((t, u, v))
}

/// Drag state for one picked particle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interaction {
    picked: Option<ParticleRef>,
    target: Option<DVec3>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Casts a ray against the surface and selects the dynamic corner with
    /// the largest barycentric weight on the nearest hit face.
    pub fn pick(&mut self, state: &SimulationState, origin: DVec3, dir: DVec3) -> Option<ParticleRef> {
        self.release();
        let dir = dir.normalize_or_zero();
        if dir == DVec3::ZERO {
            return None;
        }

        let mut best: Option<(f64, usize, [f64; 3])> = None;
        for f in 0..state.faces.len() {
            if let Some((t, u, v)) = ray_triangle(origin, dir, state.face_positions(f)) {
                if best.map_or(true, |(bt, _, _)| t < bt) {
                    best = Some((t, f, [1.0 - u - v, u, v]));
                }
            }
        }

        let (t, face, weights) = best?;
        let picked = state.faces[face]
            .iter()
            .zip(weights)
            .filter(|(r, _)| !r.is_anchor())
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(r, _)| *r)?;

        debug!(?picked, face, t, "Picked particle");
        self.picked = Some(picked);
        self.target = Some(state.position(picked));
        Some(picked)
    }

    /// Moves the drag target to the point on the ray closest to the
    /// picked particle.
    pub fn drag(&mut self, state: &SimulationState, origin: DVec3, dir: DVec3) {
        let Some(picked) = self.picked else {
            return;
        };
        let dir = dir.normalize_or_zero();
        let x = state.position(picked);
        let t = (x - origin).dot(dir).max(0.0);
        self.target = Some(origin + t * dir);
    }

    pub fn release(&mut self) {
        self.picked = None;
        self.target = None;
    }

    pub fn picked(&self) -> Option<ParticleRef> {
        self.picked
    }

    pub fn target(&self) -> Option<DVec3> {
        self.target
    }

    /// Pulls the picked particle toward the drag target for one step.
    pub fn apply(&self, state: &mut SimulationState, config: &SolverConfig, dt: f64) {
        let (Some(ParticleRef::Dynamic(i)), Some(target)) = (self.picked, self.target) else {
            return;
        };
        let Some(p) = state.particles.get_mut(i as usize) else {
            return;
        };
        if !p.is_free() {
            return;
        }
        let offset = target - p.position;
        match config.drag_mode {
            DragMode::Force => {
                p.velocity += config.interaction_stiffness * dt * offset * p.inv_mass;
            }
            DragMode::VelocityBlend => {
                let alpha = (config.interaction_stiffness * dt).clamp(0.0, 1.0);
                if dt > 0.0 {
                    p.velocity = p.velocity.lerp(offset / dt, alpha);
                }
            }
        }
    }
}

/// A handle anchor tied to particles by springs, moved with the cursor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MouseSpring {
    handle: Option<ParticleRef>,
    springs: Vec<usize>,
    start: Option<DVec3>,
}

impl MouseSpring {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mouse spring whose handle is created at `start`.
    pub fn starting_at(start: DVec3) -> Self {
        Self {
            start: Some(start),
            ..Self::default()
        }
    }

    /// Ties `to` to the handle. The handle is created on first use, at the
    /// start position if one was given, otherwise at `to`.
    pub fn attach(
        &mut self,
        state: &mut SimulationState,
        to: ParticleRef,
        rest_length: f64,
        stiffness: f64,
        damping: f64,
    ) -> ParticleRef {
        let handle = match self.handle {
            Some(h) => h,
            None => {
                let start = self.start.unwrap_or_else(|| state.position(to));
                let h = state.add_anchor(start);
                self.handle = Some(h);
                h
            }
        };
        let spring = state.add_spring_with_rest(to, handle, stiffness, damping, rest_length);
        self.springs.push(spring);
        handle
    }

    /// Enables the handle springs with the given constants, or slackens
    /// them to zero.
    pub fn set_enabled(&self, state: &mut SimulationState, enabled: bool, stiffness: f64, damping: f64) {
        let (k, c) = if enabled { (stiffness, damping) } else { (0.0, 0.0) };
        for &i in &self.springs {
            if let Some(s) = state.springs.get_mut(i) {
                s.stiffness = k;
                s.damping = c;
            }
        }
    }

    /// Moves the handle and stops it.
    pub fn set_position(&self, state: &mut SimulationState, position: DVec3) {
        if let Some(h) = self.handle {
            state.set_position(h, position);
            state.set_velocity(h, DVec3::ZERO);
        }
    }

    pub fn handle(&self) -> Option<ParticleRef> {
        self.handle
    }

    pub fn springs(&self) -> &[usize] {
        &self.springs
    }
}
