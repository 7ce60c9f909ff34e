//! Topology store: particles, anchors, springs, tetrahedra, surface faces.
//!
//! Elements refer to nodes by [`ParticleRef`], which names either a
//! dynamic particle or a fixed anchor. Anchors are never integrated and
//! never enter the linear system.

use elastica_math::DVec3;
use elastica_mesh::TetMesh;
use elastica_types::{ElasticaError, ElasticaResult, ParticleRef};
use tracing::{debug, warn};

use crate::boundary::BoundaryMap;
use crate::elements::{Spring, TetElement};

/// A dynamic point mass.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Force accumulator, rebuilt each step.
    pub force: DVec3,
    /// Inverse mass. Zero pins the particle in place.
    pub inv_mass: f64,
    /// Position at the start of the last step (collision sweeps start here).
    pub previous_position: DVec3,
    /// Set when the collision pass corrected this particle this frame.
    pub marked: bool,
    /// Sum of incident element stress norms (averaged for display).
    pub stress_sum: f64,
    /// Number of elements contributing to `stress_sum`.
    pub stress_count: u32,
}

impl Particle {
    pub fn new(position: DVec3, velocity: DVec3, inv_mass: f64) -> Self {
        Self {
            position,
            velocity,
            force: DVec3::ZERO,
            inv_mass,
            previous_position: position,
            marked: false,
            stress_sum: 0.0,
            stress_count: 0,
        }
    }

    /// True when the particle takes part in integration.
    #[inline]
    pub fn is_free(&self) -> bool {
        self.inv_mass > 0.0 && self.inv_mass.is_finite()
    }

    /// Averaged incident stress, zero when nothing contributed.
    #[inline]
    pub fn average_stress(&self) -> f64 {
        if self.stress_count == 0 {
            0.0
        } else {
            self.stress_sum / self.stress_count as f64
        }
    }
}

/// A fixed point. Only moved by the caller (e.g. a drag handle).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub position: DVec3,
    pub velocity: DVec3,
}

impl Anchor {
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
        }
    }
}

/// Owns every simulated entity.
///
/// Indices held in [`ParticleRef`]s must be in range of the matching
/// collection; accessors panic in debug builds when they are not.
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    pub particles: Vec<Particle>,
    pub anchors: Vec<Anchor>,
    pub springs: Vec<Spring>,
    pub tets: Vec<TetElement>,
    /// Surface triangles, wound outward.
    pub faces: Vec<[ParticleRef; 3]>,
    /// Owning tetrahedron of each face.
    pub face_to_tet: Vec<u32>,
    boundary: BoundaryMap,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every entity.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.anchors.clear();
        self.springs.clear();
        self.tets.clear();
        self.faces.clear();
        self.face_to_tet.clear();
        self.boundary = BoundaryMap::default();
    }

    /// Adds a dynamic particle and returns its handle.
    pub fn add_particle(&mut self, position: DVec3, velocity: DVec3, inv_mass: f64) -> ParticleRef {
        self.particles.push(Particle::new(position, velocity, inv_mass));
        ParticleRef::Dynamic((self.particles.len() - 1) as u32)
    }

    /// Adds a fixed anchor and returns its handle.
    pub fn add_anchor(&mut self, position: DVec3) -> ParticleRef {
        self.anchors.push(Anchor::new(position));
        ParticleRef::Anchor((self.anchors.len() - 1) as u32)
    }

    /// Adds a spring whose rest length is the current distance between
    /// its endpoints.
    pub fn add_spring(&mut self, to: ParticleRef, from: ParticleRef, stiffness: f64, damping: f64) -> usize {
        let rest_length = (self.position(to) - self.position(from)).length();
        self.add_spring_with_rest(to, from, stiffness, damping, rest_length)
    }

    /// Adds a spring with an explicit rest length.
    pub fn add_spring_with_rest(
        &mut self,
        to: ParticleRef,
        from: ParticleRef,
        stiffness: f64,
        damping: f64,
        rest_length: f64,
    ) -> usize {
        self.springs.push(Spring {
            to,
            from,
            stiffness,
            damping,
            rest_length,
        });
        self.springs.len() - 1
    }

    /// Adds a tetrahedron using the current positions as rest shape.
    ///
    /// A degenerate rest shape is kept but flagged; it contributes nothing.
    pub fn add_tet(&mut self, vertices: [ParticleRef; 4], stiffness: f64, damping: f64) -> usize {
        let rest = vertices.map(|v| self.position(v));
        let tet = TetElement::new(vertices, rest, stiffness, damping);
        if tet.degenerate {
            warn!(index = self.tets.len(), "Degenerate tetrahedron rest shape; element skipped");
        }
        self.tets.push(tet);
        self.tets.len() - 1
    }

    /// Replaces the surface and rebuilds the boundary map.
    pub fn set_surface(&mut self, faces: Vec<[ParticleRef; 3]>, face_to_tet: Vec<u32>) -> ElasticaResult<()> {
        if faces.len() != face_to_tet.len() {
            return Err(ElasticaError::InvalidTopology(format!(
                "face_to_tet length ({}) != face count ({})",
                face_to_tet.len(),
                faces.len()
            )));
        }
        for face in &faces {
            for &corner in face {
                if !self.contains(corner) {
                    return Err(ElasticaError::InvalidTopology(format!(
                        "Face corner {corner:?} out of range"
                    )));
                }
            }
        }
        self.boundary = BoundaryMap::build(&faces);
        self.faces = faces;
        self.face_to_tet = face_to_tet;
        Ok(())
    }

    /// Builds a store from a tetrahedral mesh.
    ///
    /// Points for which `anchored(index, position)` is true become anchors,
    /// all others dynamic particles with inverse mass `inv_mass`.
    pub fn from_tet_mesh<F>(
        mesh: &TetMesh,
        inv_mass: f64,
        stiffness: f64,
        damping: f64,
        anchored: F,
    ) -> ElasticaResult<Self>
    where
        F: Fn(usize, DVec3) -> bool,
    {
        mesh.validate()?;
        let mut state = Self::new();

        let refs: Vec<ParticleRef> = mesh
            .points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                if anchored(i, p) {
                    state.add_anchor(p)
                } else {
                    state.add_particle(p, DVec3::ZERO, inv_mass)
                }
            })
            .collect();

        for t in 0..mesh.tet_count() {
            let tet = mesh.tet(t).map(|i| refs[i as usize]);
            state.add_tet(tet, stiffness, damping);
        }

        let faces = (0..mesh.face_count())
            .map(|f| mesh.face(f).map(|i| refs[i as usize]))
            .collect();
        state.set_surface(faces, mesh.face_to_tet.clone())?;

        debug!(
            particles = state.particles.len(),
            anchors = state.anchors.len(),
            tets = state.tets.len(),
            faces = state.faces.len(),
            "Built simulation state from tet mesh"
        );
        Ok(state)
    }

    /// True if `r` names an existing particle or anchor.
    pub fn contains(&self, r: ParticleRef) -> bool {
        match r {
            ParticleRef::Dynamic(i) => (i as usize) < self.particles.len(),
            ParticleRef::Anchor(i) => (i as usize) < self.anchors.len(),
        }
    }

    /// Position of a particle or anchor.
    #[inline]
    pub fn position(&self, r: ParticleRef) -> DVec3 {
        match r {
            ParticleRef::Dynamic(i) => self.particles[i as usize].position,
            ParticleRef::Anchor(i) => self.anchors[i as usize].position,
        }
    }

    /// Velocity of a particle or anchor.
    #[inline]
    pub fn velocity(&self, r: ParticleRef) -> DVec3 {
        match r {
            ParticleRef::Dynamic(i) => self.particles[i as usize].velocity,
            ParticleRef::Anchor(i) => self.anchors[i as usize].velocity,
        }
    }

    /// Moves a particle or anchor.
    pub fn set_position(&mut self, r: ParticleRef, position: DVec3) {
        match r {
            ParticleRef::Dynamic(i) => self.particles[i as usize].position = position,
            ParticleRef::Anchor(i) => self.anchors[i as usize].position = position,
        }
    }

    pub fn set_velocity(&mut self, r: ParticleRef, velocity: DVec3) {
        match r {
            ParticleRef::Dynamic(i) => self.particles[i as usize].velocity = velocity,
            ParticleRef::Anchor(i) => self.anchors[i as usize].velocity = velocity,
        }
    }

    /// Positions of a tetrahedron's four corners.
    #[inline]
    pub fn tet_positions(&self, tet: &TetElement) -> [DVec3; 4] {
        tet.vertices.map(|v| self.position(v))
    }

    /// Velocities of a tetrahedron's four corners.
    #[inline]
    pub fn tet_velocities(&self, tet: &TetElement) -> [DVec3; 4] {
        tet.vertices.map(|v| self.velocity(v))
    }

    /// Positions of a surface face's corners.
    #[inline]
    pub fn face_positions(&self, face: usize) -> [DVec3; 3] {
        self.faces[face].map(|v| self.position(v))
    }

    pub fn boundary(&self) -> &BoundaryMap {
        &self.boundary
    }

    /// Sets stiffness and damping of every spring.
    pub fn set_spring_properties(&mut self, stiffness: f64, damping: f64) {
        for spring in &mut self.springs {
            spring.stiffness = stiffness;
            spring.damping = damping;
        }
    }

    /// Sets stiffness and damping of every tetrahedron.
    pub fn set_element_properties(&mut self, stiffness: f64, damping: f64) {
        for tet in &mut self.tets {
            tet.stiffness = stiffness;
            tet.damping = damping;
        }
    }

    /// Records positions at the start of a step.
    pub fn save_previous(&mut self) {
        for p in &mut self.particles {
            p.previous_position = p.position;
        }
    }

    /// Clears collision marks.
    pub fn clear_marks(&mut self) {
        for p in &mut self.particles {
            p.marked = false;
        }
    }

    /// True when every position and velocity is finite.
    pub fn is_finite(&self) -> bool {
        self.particles
            .iter()
            .all(|p| p.position.is_finite() && p.velocity.is_finite())
    }

    /// Total momentum of free particles.
    pub fn momentum(&self) -> DVec3 {
        self.particles
            .iter()
            .filter(|p| p.is_free())
            .map(|p| p.velocity / p.inv_mass)
            .sum()
    }
}
