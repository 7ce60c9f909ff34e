//! # elastica-math
//!
//! Linear algebra primitives for the elastica simulation engine.
//!
//! Provides:
//! - Re-exports of double-precision `glam` types (`DVec3`, `DMat3`, etc.)
//! - Sparse matrix representation (CSR) with 3×3 block assembly
//! - A [`SparseSolver`](sparse::SparseSolver) trait with a Jacobi-preconditioned
//!   conjugate gradient and a `faer` sparse Cholesky implementation

pub mod cg;
pub mod faer_solver;
pub mod sparse;

pub use cg::ConjugateGradient;
pub use faer_solver::FaerSolver;
pub use sparse::{BlockTriplets, CsrMatrix, SolveReport, SparseSolver};

// Re-export glam types as the canonical math types for elastica.
pub use glam::{DMat3, DVec2, DVec3};

/// Outer product `a ⊗ b` as a 3×3 matrix.
#[inline]
pub fn outer(a: DVec3, b: DVec3) -> DMat3 {
    DMat3::from_cols(a * b.x, a * b.y, a * b.z)
}

/// Frobenius norm of a 3×3 matrix.
#[inline]
pub fn frobenius_norm(m: &DMat3) -> f64 {
    (m.x_axis.length_squared() + m.y_axis.length_squared() + m.z_axis.length_squared()).sqrt()
}
