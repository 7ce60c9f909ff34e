//! Physical constants and simulation defaults.

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.8;

/// Default simulation timestep (seconds).
pub const DEFAULT_DT: f64 = 0.01;

/// Default spring / element stiffness.
pub const DEFAULT_STIFFNESS: f64 = 100.0;

/// Default spring / element damping.
pub const DEFAULT_DAMPING: f64 = 10.0;

/// Default volume-conservation coefficient (Poisson's ratio).
pub const DEFAULT_POISSON: f64 = 0.3;

/// Default iteration cap for the conjugate gradient solver.
pub const DEFAULT_CG_ITERATIONS: u32 = 200;

/// Default relative residual tolerance for the conjugate gradient solver.
pub const DEFAULT_CG_TOLERANCE: f64 = 1.0e-10;

/// Default margin a corrected vertex is pushed past a face (meters).
pub const DEFAULT_COLLISION_MARGIN: f64 = 1.0e-3;

/// Default cap on collision re-query rounds per frame.
pub const DEFAULT_COLLISION_ITERATIONS: u32 = 4;

/// Restitution applied when a particle is bounced off the ground.
pub const GROUND_RESTITUTION: f64 = 0.8;

/// Epsilon for degenerate determinant / area detection.
pub const DEGENERATE_THRESHOLD: f64 = 1.0e-12;
