//! Isotropic linear elasticity operator.
//!
//! Strain is flattened to the 6-vector `(xx, yy, zz, yx, yz, zx)` and
//! multiplied by
//!
//! ```text
//!                 k          ⎡1-v  v    v    0     0     0   ⎤
//!   C = ─────────────────  · ⎢v    1-v  v    0     0     0   ⎥
//!       (1 + v)(1 - 2v)      ⎢v    v    1-v  0     0     0   ⎥
//!                            ⎢0    0    0    1-2v  0     0   ⎥
//!                            ⎢0    0    0    0     1-2v  0   ⎥
//!                            ⎣0    0    0    0     0     1-2v⎦
//! ```

use serde::{Deserialize, Serialize};

use elastica_math::{DMat3, DVec3};
use elastica_types::{ElasticaError, ElasticaResult};

/// Isotropic stiffness: element stiffness `k` and volume-conservation
/// coefficient `v` (Poisson's ratio).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsotropicElasticity {
    /// Element stiffness (Young's modulus proxy).
    pub stiffness: f64,
    /// Volume-conservation coefficient, `0 <= v < 0.5`.
    pub poisson: f64,
}

impl IsotropicElasticity {
    /// Creates an operator, rejecting coefficients that make it singular.
    pub fn new(stiffness: f64, poisson: f64) -> ElasticaResult<Self> {
        if !(0.0..0.5).contains(&poisson) {
            return Err(ElasticaError::InvalidConfig(format!(
                "poisson coefficient must be in [0, 0.5), got {poisson}"
            )));
        }
        if stiffness < 0.0 || !stiffness.is_finite() {
            return Err(ElasticaError::InvalidConfig(format!(
                "stiffness must be finite and non-negative, got {stiffness}"
            )));
        }
        Ok(Self { stiffness, poisson })
    }

    /// Overall scale `k / ((1 + v)(1 - 2v))`.
    #[inline]
    fn scale(&self) -> f64 {
        let v = self.poisson;
        self.stiffness / ((1.0 + v) * (1.0 - 2.0 * v))
    }

    /// Lamé parameters `(λ, μ)` equivalent to the Voigt operator.
    pub fn lame(&self) -> (f64, f64) {
        let s = self.scale();
        let lambda = s * self.poisson;
        let mu = 0.5 * s * (1.0 - 2.0 * self.poisson);
        (lambda, mu)
    }

    /// Applies the operator to a strain 6-vector.
    pub fn apply_voigt(&self, e: [f64; 6]) -> [f64; 6] {
        let v = self.poisson;
        let s = self.scale();
        let d = 1.0 - v;
        let shear = 1.0 - 2.0 * v;
        [
            s * (d * e[0] + v * e[1] + v * e[2]),
            s * (v * e[0] + d * e[1] + v * e[2]),
            s * (v * e[0] + v * e[1] + d * e[2]),
            s * shear * e[3],
            s * shear * e[4],
            s * shear * e[5],
        ]
    }

    /// Maps a symmetric strain tensor to a symmetric stress tensor.
    pub fn stress(&self, strain: &DMat3) -> DMat3 {
        from_voigt(self.apply_voigt(to_voigt(strain)))
    }
}

/// Flattens a symmetric tensor to `(xx, yy, zz, yx, yz, zx)`.
pub fn to_voigt(m: &DMat3) -> [f64; 6] {
    [
        m.x_axis.x,
        m.y_axis.y,
        m.z_axis.z,
        m.x_axis.y,
        m.z_axis.y,
        m.x_axis.z,
    ]
}

/// Reassembles a symmetric tensor from `(xx, yy, zz, yx, yz, zx)`.
pub fn from_voigt(v: [f64; 6]) -> DMat3 {
    let [xx, yy, zz, yx, yz, zx] = v;
    DMat3::from_cols(
        DVec3::new(xx, yx, zx),
        DVec3::new(yx, yy, yz),
        DVec3::new(zx, yz, zz),
    )
}
