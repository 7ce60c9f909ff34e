//! Flat display buffers.
//!
//! Positions are interleaved `[x, y, z, x, y, z, ...]`, colours
//! `[r, g, b, ...]`, one entry per emitted vertex. Buffers are built
//! fresh on each call.

use elastica_math::DVec3;
use elastica_solver::SimulationState;
use elastica_types::ParticleRef;

use crate::color::strain_color;

#[inline]
fn push_point(out: &mut Vec<f32>, p: DVec3) {
    out.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
}

/// Line segments, two vertices per spring (`to`, then `from`).
pub fn spring_positions(state: &SimulationState) -> Vec<f32> {
    let mut out = Vec::with_capacity(state.springs.len() * 6);
    for s in &state.springs {
        push_point(&mut out, state.position(s.to));
        push_point(&mut out, state.position(s.from));
    }
    out
}

/// Colours matching [`spring_positions`]: relative length change times
/// `strain_scale`, through the ramp.
pub fn spring_colors(state: &SimulationState, strain_scale: f64) -> Vec<f32> {
    let mut out = Vec::with_capacity(state.springs.len() * 6);
    for s in &state.springs {
        let length = (state.position(s.to) - state.position(s.from)).length();
        let c = strain_color(s.strain(length) * strain_scale);
        out.extend_from_slice(&c);
        out.extend_from_slice(&c);
    }
    out
}

/// Surface triangles, three vertices per face.
pub fn surface_positions(state: &SimulationState) -> Vec<f32> {
    let mut out = Vec::with_capacity(state.faces.len() * 9);
    for f in 0..state.faces.len() {
        for p in state.face_positions(f) {
            push_point(&mut out, p);
        }
    }
    out
}

/// Flat face normals repeated on each corner.
pub fn surface_normals(state: &SimulationState) -> Vec<f32> {
    let mut out = Vec::with_capacity(state.faces.len() * 9);
    for f in 0..state.faces.len() {
        let [a, b, c] = state.face_positions(f);
        let n = (b - a).cross(c - a).normalize_or_zero();
        for _ in 0..3 {
            push_point(&mut out, n);
        }
    }
    out
}

/// Per-corner colours from the averaged incident element stress.
///
/// Anchors have no stress accumulator and show as black.
pub fn surface_stress_colors(state: &SimulationState, stress_scale: f64) -> Vec<f32> {
    let mut out = Vec::with_capacity(state.faces.len() * 9);
    for face in &state.faces {
        for corner in face {
            let stress = match corner {
                ParticleRef::Dynamic(i) => state.particles[*i as usize].average_stress(),
                ParticleRef::Anchor(_) => 0.0,
            };
            out.extend_from_slice(&strain_color(stress * stress_scale));
        }
    }
    out
}

/// Per-corner highlight of particles corrected by the last collision pass.
pub fn surface_mark_colors(state: &SimulationState) -> Vec<f32> {
    let mut out = Vec::with_capacity(state.faces.len() * 9);
    for face in &state.faces {
        for corner in face {
            let marked = corner
                .dynamic()
                .is_some_and(|i| state.particles[i].marked);
            let color: [f32; 3] = if marked { [1.0, 0.0, 0.0] } else { [0.7, 0.7, 0.7] };
            out.extend_from_slice(&color);
        }
    }
    out
}
