//! Constitutive model trait: the core material abstraction.
//!
//! Every strain measure implements this trait, so the force assembler and
//! the stress visualisation share one code path regardless of mode.

use elastica_math::DMat3;

/// Trait for strain measures on tetrahedral elements.
///
/// # Implementations
/// - [`LinearModel`](crate::linear::LinearModel): small strain, reports
///   spurious strain under rotation
/// - [`CoRotationalModel`](crate::corotational::CoRotationalModel): Green
///   strain, zero under rigid motion
pub trait ConstitutiveModel: Send + Sync {
    /// Strain tensor for deformation gradient `f`.
    fn strain(&self, f: &DMat3) -> DMat3;

    /// First Piola stress used for nodal forces, given the stress tensor
    /// computed from [`strain`](Self::strain).
    fn piola(&self, f: &DMat3, stress: &DMat3) -> DMat3;

    /// Returns the name of this constitutive model.
    fn name(&self) -> &str;
}
