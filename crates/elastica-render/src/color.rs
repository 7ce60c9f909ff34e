//! Strain colour ramp.
//!
//! Scaled strain `s` runs black → blue → magenta → red:
//!
//! ```text
//! s < 1        (0,     0, s)
//! 1 <= s < 2   (s - 1, 0, s)
//! s >= 2       (1,     0, 1 - (s - 2))
//! ```
//!
//! Channels are clamped to `[0, 1]`.

/// Colour of a scaled strain value.
pub fn strain_color(s: f64) -> [f32; 3] {
    let s = s.max(0.0);
    let rgb = if s < 1.0 {
        [0.0, 0.0, s]
    } else if s < 2.0 {
        [s - 1.0, 0.0, s]
    } else {
        [1.0, 0.0, 1.0 - (s - 2.0)]
    };
    rgb.map(|c| c.clamp(0.0, 1.0) as f32)
}
