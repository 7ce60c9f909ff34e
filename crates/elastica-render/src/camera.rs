//! Camera framing.

use elastica_math::DVec3;
use elastica_solver::SimulationState;
use elastica_types::ParticleRef;

/// Smallest half-extent reported, so a single point still frames.
pub const MIN_EXTENT: f64 = 0.01;

/// Where to look and how much to show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Centroid of all particles and anchors.
    pub center: DVec3,
    /// Largest per-axis distance of any point from `center`.
    pub extent: f64,
}

impl CameraFrame {
    /// Frames every particle and anchor. `exclude` (typically a drag
    /// handle) still counts toward the centroid but not the extent.
    pub fn fit(state: &SimulationState, exclude: Option<ParticleRef>) -> Self {
        let count = state.particles.len() + state.anchors.len();
        if count == 0 {
            return Self {
                center: DVec3::ZERO,
                extent: MIN_EXTENT,
            };
        }

        let points = || {
            let particles = state
                .particles
                .iter()
                .enumerate()
                .map(|(i, p)| (ParticleRef::Dynamic(i as u32), p.position));
            let anchors = state
                .anchors
                .iter()
                .enumerate()
                .map(|(i, a)| (ParticleRef::Anchor(i as u32), a.position));
            particles.chain(anchors)
        };

        let center = points().map(|(_, p)| p).sum::<DVec3>() / count as f64;
        let extent = points()
            .filter(|(r, _)| Some(*r) != exclude)
            .map(|(_, p)| (p - center).abs().max_element())
            .fold(MIN_EXTENT, f64::max);

        Self { center, extent }
    }

    /// Zoom that maps `extent` onto `half_width` pixels, clamped to
    /// `[0.001, 1000]`.
    pub fn zoom(&self, half_width: f64) -> f64 {
        (half_width / self.extent).clamp(0.001, 1000.0)
    }
}
