//! Co-rotational model.
//!
//! Adds the quadratic term of the displacement gradient, giving the Green
//! strain `E = ½(FᵀF - I)`. A pure rotation has `FᵀF = I` and therefore
//! zero strain, so folded or spinning elements carry no artificial energy.
//! The nodal-force stress is pushed forward through `F` (`P = F·S`), which
//! keeps forces rotating with the element.

use elastica_math::DMat3;

use crate::strain::{displacement_gradient, green_strain};
use crate::traits::ConstitutiveModel;

/// Green-strain (co-rotational) model.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoRotationalModel;

impl ConstitutiveModel for CoRotationalModel {
    fn strain(&self, f: &DMat3) -> DMat3 {
        green_strain(&displacement_gradient(f))
    }

    fn piola(&self, f: &DMat3, stress: &DMat3) -> DMat3 {
        *f * *stress
    }

    fn name(&self) -> &str {
        "co_rotational"
    }
}
