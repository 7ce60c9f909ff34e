//! Point/triangle and segment/segment primitives.

use elastica_math::DVec3;
use elastica_types::constants::DEGENERATE_THRESHOLD;

/// Tolerance on barycentric weights when deciding "inside the triangle".
const INSIDE_TOLERANCE: f64 = 1e-9;

/// Unit normal of the triangle `(a, b, c)` by the right-hand rule, or
/// `None` for a degenerate triangle.
#[inline]
pub fn face_normal(a: DVec3, b: DVec3, c: DVec3) -> Option<DVec3> {
    let n = (b - a).cross(c - a);
    let len = n.length();
    (len > DEGENERATE_THRESHOLD).then(|| n / len)
}

/// A point expressed relative to a triangle's plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneProjection {
    pub normal: DVec3,
    /// Signed distance along `normal` (negative behind the face).
    pub signed_distance: f64,
    /// Barycentric weights of the projected point on `(a, b, c)`.
    pub barycentric: [f64; 3],
}

impl PlaneProjection {
    /// True if the projected point falls within the triangle.
    pub fn is_inside(&self) -> bool {
        self.barycentric.iter().all(|&w| w >= -INSIDE_TOLERANCE)
    }
}

/// Projects `p` onto the plane of `(a, b, c)`.
pub fn project_to_plane(p: DVec3, a: DVec3, b: DVec3, c: DVec3) -> Option<PlaneProjection> {
    let normal = face_normal(a, b, c)?;
    let ab = b - a;
    let ac = c - a;
    let signed_distance = (p - a).dot(normal);
    let ap = p - normal * signed_distance - a;

    // Barycentric coordinates using Cramer's rule
    let d00 = ab.dot(ab);
    let d01 = ab.dot(ac);
    let d11 = ac.dot(ac);
    let d20 = ap.dot(ab);
    let d21 = ap.dot(ac);
    let denom = d00 * d11 - d01 * d01;
    if denom.abs() < DEGENERATE_THRESHOLD {
        return None;
    }
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;

    Some(PlaneProjection {
        normal,
        signed_distance,
        barycentric: [1.0 - v - w, v, w],
    })
}

/// Closest distance between segments `p0-p1` and `q0-q1`.
pub fn segment_distance(p0: DVec3, p1: DVec3, q0: DVec3, q1: DVec3) -> f64 {
    let d1 = p1 - p0;
    let d2 = q1 - q0;
    let r = p0 - q0;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    let (s, t) = if a <= DEGENERATE_THRESHOLD && e <= DEGENERATE_THRESHOLD {
        (0.0, 0.0)
    } else if a <= DEGENERATE_THRESHOLD {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= DEGENERATE_THRESHOLD {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            let mut s = if denom > DEGENERATE_THRESHOLD {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mut t = (b * s + f) / e;
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };

    ((p0 + d1 * s) - (q0 + d2 * t)).length()
}
