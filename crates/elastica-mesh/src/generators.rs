//! Procedural mesh generators for scenes and testing.
//!
//! These generators produce deterministic, resolution-configurable
//! tetrahedral meshes with positively oriented tetrahedra and outward
//! facing surface triangles.

use std::collections::HashMap;

use elastica_math::DVec3;

use crate::mesh::TetMesh;

/// Cube corner offsets indexed by bit pattern (x = 1, y = 2, z = 4).
const CUBE_CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [0, 1, 0],
    [1, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [0, 1, 1],
    [1, 1, 1],
];

/// Six tetrahedra around the 0–7 diagonal. Every cube is split the same
/// way, so shared faces between neighbouring cubes match.
const CUBE_TETS: [[usize; 4]; 6] = [
    [0, 1, 3, 7],
    [0, 1, 5, 7],
    [0, 2, 3, 7],
    [0, 2, 6, 7],
    [0, 4, 5, 7],
    [0, 4, 6, 7],
];

/// Generates a box-shaped bar of `nx × ny × nz` cubes with edge `spacing`,
/// with its minimum corner at `origin`.
///
/// # Example
/// ```
/// use elastica_mesh::generators::bar;
/// use elastica_math::DVec3;
/// let mesh = bar(2, 1, 1, 1.0, DVec3::ZERO);
/// assert_eq!(mesh.point_count(), 12);
/// assert_eq!(mesh.tet_count(), 12);
/// ```
pub fn bar(nx: usize, ny: usize, nz: usize, spacing: f64, origin: DVec3) -> TetMesh {
    let (px, py, pz) = (nx + 1, ny + 1, nz + 1);
    let point_index = |i: usize, j: usize, k: usize| (i + px * (j + py * k)) as u32;

    let mut points = Vec::with_capacity(px * py * pz);
    for k in 0..pz {
        for j in 0..py {
            for i in 0..px {
                points.push(origin + DVec3::new(i as f64, j as f64, k as f64) * spacing);
            }
        }
    }

    let mut tets = Vec::with_capacity(nx * ny * nz * 6 * 4);
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let corner = |c: usize| {
                    let [dx, dy, dz] = CUBE_CORNERS[c];
                    point_index(i + dx, j + dy, k + dz)
                };
                for tet in CUBE_TETS {
                    let mut v = tet.map(corner);
                    if signed_volume(&points, v) < 0.0 {
                        v.swap(2, 3);
                    }
                    tets.extend_from_slice(&v);
                }
            }
        }
    }

    let (faces, face_to_tet) = extract_surface(&points, &tets);
    TetMesh {
        points,
        tets,
        faces,
        face_to_tet,
    }
}

/// A single right-angled tetrahedron with unit legs at `origin`.
pub fn single_tet(origin: DVec3) -> TetMesh {
    let points = vec![
        origin,
        origin + DVec3::X,
        origin + DVec3::Y,
        origin + DVec3::Z,
    ];
    let tets = vec![0, 1, 2, 3];
    let (faces, face_to_tet) = extract_surface(&points, &tets);
    TetMesh {
        points,
        tets,
        faces,
        face_to_tet,
    }
}

/// Finds the boundary triangles of a tetrahedral mesh: faces referenced by
/// exactly one tetrahedron, wound so their normal points away from the
/// tetrahedron's fourth vertex.
///
/// Returns the flat face index buffer and the owning tetrahedron per face,
/// in first-seen order.
pub fn extract_surface(points: &[DVec3], tets: &[u32]) -> (Vec<u32>, Vec<u32>) {
    let mut seen: HashMap<[u32; 3], (usize, [u32; 3], u32)> = HashMap::new();
    let mut order: Vec<[u32; 3]> = Vec::new();

    for (t, tet) in tets.chunks_exact(4).enumerate() {
        for skip in 0..4 {
            let mut face = [0u32; 3];
            let mut n = 0;
            for (corner, &v) in tet.iter().enumerate() {
                if corner != skip {
                    face[n] = v;
                    n += 1;
                }
            }
            let opposite = points[tet[skip] as usize];
            let [a, b, c] = face.map(|i| points[i as usize]);
            if (b - a).cross(c - a).dot(opposite - a) > 0.0 {
                face.swap(1, 2);
            }

            let mut key = face;
            key.sort_unstable();
            let entry = seen.entry(key).or_insert_with(|| {
                order.push(key);
                (0, face, t as u32)
            });
            entry.0 += 1;
        }
    }

    let mut faces = Vec::new();
    let mut face_to_tet = Vec::new();
    for key in order {
        let (count, face, tet) = seen[&key];
        if count == 1 {
            faces.extend_from_slice(&face);
            face_to_tet.push(tet);
        }
    }
    (faces, face_to_tet)
}

fn signed_volume(points: &[DVec3], v: [u32; 4]) -> f64 {
    let [a, b, c, d] = v.map(|i| points[i as usize]);
    (b - a).dot((c - a).cross(d - a)) / 6.0
}
