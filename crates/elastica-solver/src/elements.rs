//! Element definitions: springs and linear tetrahedra.

use elastica_material::strain::edge_matrix;
use elastica_math::{DMat3, DVec3};
use elastica_types::constants::DEGENERATE_THRESHOLD;
use elastica_types::ParticleRef;

/// A damped spring between two nodes.
///
/// Its direction is measured from `from` toward `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub to: ParticleRef,
    pub from: ParticleRef,
    pub stiffness: f64,
    pub damping: f64,
    pub rest_length: f64,
}

impl Spring {
    /// Relative length change `|ℓ - L| / L` for a current length `ℓ`.
    pub fn strain(&self, length: f64) -> f64 {
        if self.rest_length > DEGENERATE_THRESHOLD {
            (length - self.rest_length).abs() / self.rest_length
        } else {
            0.0
        }
    }
}

/// A linear tetrahedron.
///
/// `rest_inv` is `Dm⁻¹`, the inverse of the rest edge matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TetElement {
    pub vertices: [ParticleRef; 4],
    pub stiffness: f64,
    pub damping: f64,
    pub rest_inv: DMat3,
    /// Rest volume `|det Dm| / 6`.
    pub rest_volume: f64,
    /// Set when the rest shape has (near) zero volume.
    pub degenerate: bool,
    /// Frobenius norm of the last evaluated stress.
    pub stress_norm: f64,
}

impl TetElement {
    pub fn new(vertices: [ParticleRef; 4], rest: [DVec3; 4], stiffness: f64, damping: f64) -> Self {
        let dm = edge_matrix(rest);
        let det = dm.determinant();
        let degenerate = det.abs() < DEGENERATE_THRESHOLD || !det.is_finite();
        Self {
            vertices,
            stiffness,
            damping,
            rest_inv: if degenerate { DMat3::ZERO } else { dm.inverse() },
            rest_volume: det.abs() / 6.0,
            degenerate,
            stress_norm: 0.0,
        }
    }

    /// Shape gradients `b_a` with `F = Σ x_a ⊗ b_a`.
    ///
    /// `b_1..b_3` are the rows of `Dm⁻¹`; `b_0` is minus their sum.
    pub fn shape_gradients(&self) -> [DVec3; 4] {
        let b1 = self.rest_inv.row(0);
        let b2 = self.rest_inv.row(1);
        let b3 = self.rest_inv.row(2);
        [-(b1 + b2 + b3), b1, b2, b3]
    }
}
