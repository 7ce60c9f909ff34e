//! Strongly-typed identifiers for simulation entities.
//!
//! Dynamic particles and fixed anchors live in two separate arrays. A
//! [`ParticleRef`] names exactly one slot in one of them, so the two
//! index spaces can never alias.

use serde::{Deserialize, Serialize};

/// Reference to either a dynamic particle or a fixed anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParticleRef {
    /// Index into the dynamic particle array (part of the solved unknowns).
    Dynamic(u32),
    /// Index into the anchor array (never integrated, infinite mass).
    Anchor(u32),
}

impl ParticleRef {
    /// Decodes the legacy signed encoding: `i >= 0` is a particle,
    /// `i < 0` is anchor `-(i + 1)`.
    #[inline]
    pub fn from_signed(i: i64) -> Self {
        if i >= 0 {
            Self::Dynamic(i as u32)
        } else {
            Self::Anchor((-(i + 1)) as u32)
        }
    }

    /// Encodes back into the signed index space.
    #[inline]
    pub fn to_signed(self) -> i64 {
        match self {
            Self::Dynamic(i) => i as i64,
            Self::Anchor(i) => -(i as i64) - 1,
        }
    }

    /// Returns the dynamic particle index, or `None` for anchors.
    #[inline]
    pub fn dynamic(self) -> Option<usize> {
        match self {
            Self::Dynamic(i) => Some(i as usize),
            Self::Anchor(_) => None,
        }
    }

    /// Returns true if this refers to an anchor.
    #[inline]
    pub fn is_anchor(self) -> bool {
        matches!(self, Self::Anchor(_))
    }
}
