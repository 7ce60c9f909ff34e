//! Deformation gradient and strain measures.
//!
//! For a tetrahedron with vertices `x0..x3` the edge matrix is
//! `D = [x1 - x0, x2 - x0, x3 - x0]`. With `Dm⁻¹` cached from the rest
//! configuration, the deformation gradient is `F = Ds · Dm⁻¹` and the
//! displacement gradient is `∇u = F - I`.

use serde::{Deserialize, Serialize};

use elastica_math::{DMat3, DVec3};

use crate::corotational::CoRotationalModel;
use crate::elasticity::IsotropicElasticity;
use crate::linear::LinearModel;
use crate::traits::ConstitutiveModel;

/// Which strain measure drives material response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrainMode {
    /// Cauchy small strain `½(∇u + ∇uᵀ)`.
    Linear,
    /// Green strain `½(∇u + ∇uᵀ + ∇uᵀ∇u)`, free of rigid-rotation artifacts.
    #[default]
    Corotational,
}

impl StrainMode {
    /// Returns the constitutive model for this mode.
    pub fn model(self) -> &'static dyn ConstitutiveModel {
        match self {
            Self::Linear => &LinearModel,
            Self::Corotational => &CoRotationalModel,
        }
    }
}

/// Strain, stress, and stress magnitude of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressState {
    /// Deformation gradient `F`.
    pub deformation: DMat3,
    /// Symmetric strain tensor.
    pub strain: DMat3,
    /// Symmetric stress tensor.
    pub stress: DMat3,
    /// Frobenius norm of `stress`.
    pub norm: f64,
}

/// Edge matrix with columns `p1 - p0`, `p2 - p0`, `p3 - p0`.
#[inline]
pub fn edge_matrix(p: [DVec3; 4]) -> DMat3 {
    DMat3::from_cols(p[1] - p[0], p[2] - p[0], p[3] - p[0])
}

/// Deformation gradient `F = Ds · Dm⁻¹`.
#[inline]
pub fn deformation_gradient(current: [DVec3; 4], rest_inv: &DMat3) -> DMat3 {
    edge_matrix(current) * *rest_inv
}

/// Displacement gradient `∇u = F - I`.
#[inline]
pub fn displacement_gradient(f: &DMat3) -> DMat3 {
    *f - DMat3::IDENTITY
}

/// Cauchy small strain `½(∇u + ∇uᵀ)`.
#[inline]
pub fn linear_strain(grad_u: &DMat3) -> DMat3 {
    (*grad_u + grad_u.transpose()) * 0.5
}

/// Green strain `½(∇u + ∇uᵀ + ∇uᵀ∇u)`.
#[inline]
pub fn green_strain(grad_u: &DMat3) -> DMat3 {
    let gt = grad_u.transpose();
    (*grad_u + gt + gt * *grad_u) * 0.5
}

/// Evaluates strain and stress of one element for the given mode.
pub fn evaluate(
    mode: StrainMode,
    current: [DVec3; 4],
    rest_inv: &DMat3,
    elasticity: &IsotropicElasticity,
) -> StressState {
    let f = deformation_gradient(current, rest_inv);
    let strain = mode.model().strain(&f);
    let stress = elasticity.stress(&strain);
    StressState {
        deformation: f,
        strain,
        stress,
        norm: elastica_math::frobenius_norm(&stress),
    }
}
