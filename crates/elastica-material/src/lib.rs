//! # elastica-material
//!
//! Strain/stress evaluation for tetrahedral elements.
//!
//! ## Design
//!
//! The [`ConstitutiveModel`] trait turns a deformation gradient into a
//! strain tensor and maps a stress tensor back to the first Piola stress
//! used for nodal forces. [`LinearModel`] (small strain) and
//! [`CoRotationalModel`] (Green strain, rotation invariant) are selected
//! per step through [`StrainMode`].
//!
//! [`IsotropicElasticity`] is the fixed 6×6 Voigt operator mapping strain
//! to stress, parameterised by stiffness `k` and the volume-conservation
//! coefficient `v`.

pub mod corotational;
pub mod elasticity;
pub mod linear;
pub mod strain;
pub mod traits;

pub use corotational::CoRotationalModel;
pub use elasticity::IsotropicElasticity;
pub use linear::LinearModel;
pub use strain::{StrainMode, StressState};
pub use traits::ConstitutiveModel;
