//! Linear (small-strain) model.
//!
//! Measures strain as the symmetric part of the displacement gradient.
//! Cheap and exact for small deformations, but rotation shows up as strain,
//! so a spinning element stiffens and drifts.

use elastica_math::DMat3;

use crate::strain::{displacement_gradient, linear_strain};
use crate::traits::ConstitutiveModel;

/// Cauchy small-strain model.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearModel;

impl ConstitutiveModel for LinearModel {
    fn strain(&self, f: &DMat3) -> DMat3 {
        linear_strain(&displacement_gradient(f))
    }

    fn piola(&self, _f: &DMat3, stress: &DMat3) -> DMat3 {
        *stress
    }

    fn name(&self) -> &str {
        "linear"
    }
}
