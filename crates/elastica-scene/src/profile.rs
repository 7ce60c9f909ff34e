//! Accumulated frame timings.

/// Wall-clock totals since the last reset (seconds).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProfileInfo {
    pub frames: u64,
    pub assembly_time: f64,
    pub solve_time: f64,
    pub collision_time: f64,
    pub frame_time: f64,
}

impl ProfileInfo {
    /// Mean wall time per frame, zero before the first frame.
    pub fn average_frame_time(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.frame_time / self.frames as f64
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
