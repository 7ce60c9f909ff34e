//! Integration tests for elastica-contact.

use elastica_contact::geometry::{face_normal, project_to_plane, segment_distance};
use elastica_contact::{
    BruteForceOracle, CollisionOracle, CollisionResponse, Collisions, GroundPlane, NullOracle,
    VertexFaceContact,
};
use elastica_math::DVec3;
use elastica_mesh::generators::extract_surface;
use elastica_mesh::TetMesh;
use elastica_solver::SimulationState;

/// Two unit tets; the second one's first corner pokes 0.05 into the
/// first one's bottom face.
fn overlapping_tets() -> SimulationState {
    let b = DVec3::new(0.2, 0.2, 0.05);
    let points = vec![
        DVec3::ZERO,
        DVec3::X,
        DVec3::Y,
        DVec3::Z,
        b,
        b + DVec3::X,
        b + DVec3::Y,
        b + DVec3::Z,
    ];
    let tets = vec![0, 1, 2, 3, 4, 5, 6, 7];
    let (faces, face_to_tet) = extract_surface(&points, &tets);
    let mesh = TetMesh {
        points,
        tets,
        faces,
        face_to_tet,
    };
    SimulationState::from_tet_mesh(&mesh, 1.0, 100.0, 1.0, |_, _| false).unwrap()
}

/// Oracle that reports the same contact forever.
struct StuckOracle;

impl CollisionOracle for StuckOracle {
    fn init_system(&mut self, _positions: &[DVec3], _faces: &[[u32; 3]]) {}

    fn update_vertex(&mut self, _index: u32, _position: DVec3) {}

    fn get_collisions(&mut self) -> Collisions {
        Collisions {
            vertex_face: vec![VertexFaceContact {
                vertex: 0,
                face: 0,
                time: 0.0,
                depth: 0.01,
            }],
            edge_edge: Vec::new(),
        }
    }

    fn name(&self) -> &str {
        "stuck"
    }
}

// ─── Geometry Tests ───────────────────────────────────────────

#[test]
fn face_normal_right_hand() {
    let n = face_normal(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
    assert_eq!(n, DVec3::Z);
    assert!(face_normal(DVec3::ZERO, DVec3::X, DVec3::X * 2.0).is_none());
}

#[test]
fn plane_projection_inside_and_outside() {
    let proj = project_to_plane(DVec3::new(0.25, 0.25, -0.5), DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
    assert!((proj.signed_distance + 0.5).abs() < 1e-12);
    assert!(proj.is_inside());
    assert!((proj.barycentric[0] - 0.5).abs() < 1e-12);

    let outside = project_to_plane(DVec3::new(1.0, 1.0, 0.0), DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
    assert!(!outside.is_inside());
}

#[test]
fn segment_distance_cases() {
    let d = segment_distance(DVec3::ZERO, DVec3::X, DVec3::new(0.5, -1.0, 0.3), DVec3::new(0.5, 1.0, 0.3));
    assert!((d - 0.3).abs() < 1e-12);

    let parallel = segment_distance(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::new(1.0, 1.0, 0.0));
    assert!((parallel - 1.0).abs() < 1e-12);

    let endpoint = segment_distance(DVec3::ZERO, DVec3::X, DVec3::new(3.0, 0.0, 0.0), DVec3::new(4.0, 0.0, 0.0));
    assert!((endpoint - 2.0).abs() < 1e-12);
}

// ─── Oracle Tests ─────────────────────────────────────────────

#[test]
fn brute_force_finds_single_intrusion() {
    let state = overlapping_tets();
    let mut oracle = BruteForceOracle::new(0.1);
    CollisionResponse::new(1e-3, 4).init_oracle(&mut oracle, &state);
    assert_eq!(oracle.vertex_count(), 8);
    assert_eq!(oracle.face_count(), 8);

    let hits = oracle.get_collisions();
    assert_eq!(hits.vertex_face.len(), 1);
    let contact = hits.vertex_face[0];
    assert!(contact.is_penetrating());
    assert!((contact.depth - 0.05).abs() < 1e-12);
    let p = state.position(state.boundary().points[contact.vertex as usize]);
    assert_eq!(p, DVec3::new(0.2, 0.2, 0.05));
}

#[test]
fn brute_force_ignores_own_surface() {
    let state = SimulationState::from_tet_mesh(
        &elastica_mesh::generators::bar(3, 2, 2, 1.0, DVec3::ZERO),
        1.0,
        100.0,
        1.0,
        |_, _| false,
    )
    .unwrap();
    let mut oracle = BruteForceOracle::new(0.1);
    CollisionResponse::new(1e-3, 4).init_oracle(&mut oracle, &state);
    assert!(oracle.get_collisions().vertex_face.is_empty());
}

#[test]
fn brute_force_reports_edges() {
    let positions = [
        DVec3::ZERO,
        DVec3::X,
        DVec3::Y,
        DVec3::new(0.5, -0.5, 0.05),
        DVec3::new(0.5, 0.5, 0.05),
        DVec3::new(2.0, 0.0, 0.05),
    ];
    let faces = [[0, 1, 2], [3, 4, 5]];
    let mut oracle = BruteForceOracle::new(0.1).with_edges();
    oracle.init_system(&positions, &faces);
    let hits = oracle.get_collisions();
    let pair = hits
        .edge_edge
        .iter()
        .find(|c| c.edge_a == [0, 1] && c.edge_b == [3, 4])
        .unwrap();
    assert!((pair.distance - 0.05).abs() < 1e-12);
    assert!(hits
        .edge_edge
        .iter()
        .all(|c| c.edge_a.iter().all(|v| !c.edge_b.contains(v))));
}

#[test]
fn contact_serialization() {
    let hits = Collisions {
        vertex_face: vec![VertexFaceContact {
            vertex: 3,
            face: 7,
            time: 0.25,
            depth: 0.01,
        }],
        edge_edge: Vec::new(),
    };
    let json = serde_json::to_string(&hits).unwrap();
    let back: Collisions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, hits);
}

// ─── Response Tests ───────────────────────────────────────────

#[test]
fn response_projects_and_is_idempotent() {
    let mut state = overlapping_tets();
    state.particles[4].velocity = DVec3::new(0.0, 0.0, 1.0);
    let response = CollisionResponse::new(1e-3, 4);
    let mut oracle = BruteForceOracle::new(0.1);
    response.init_oracle(&mut oracle, &state);

    let report = response.resolve(&mut oracle, &mut state);
    assert!(report.resolved);
    assert_eq!(report.corrections, 1);
    assert_eq!(report.iterations, 2);

    let p = &state.particles[4];
    assert!((p.position - DVec3::new(0.2, 0.2, -1e-3)).length() < 1e-12);
    assert_eq!(p.velocity, DVec3::ZERO);
    assert!(p.marked);
    assert_eq!(state.particles.iter().filter(|p| p.marked).count(), 1);

    assert!(oracle.get_collisions().vertex_face.is_empty());
    let again = response.resolve(&mut oracle, &mut state);
    assert_eq!(again.corrections, 0);
    // Marks stay until the frame loop clears them.
    assert!(state.particles[4].marked);
    state.clear_marks();
    response.resolve(&mut oracle, &mut state);
    assert!(!state.particles[4].marked);
}

#[test]
fn response_respects_iteration_cap() {
    let mut state = overlapping_tets();
    let response = CollisionResponse::new(1e-3, 3);
    let report = response.resolve(&mut StuckOracle, &mut state);
    assert_eq!(report.iterations, 3);
    assert!(!report.resolved);
    assert_eq!(report.corrections, 3);
    assert!(state.is_finite());
}

#[test]
fn response_leaves_anchors() {
    let state = overlapping_tets();
    let mut anchored = SimulationState::new();
    let mut refs = Vec::new();
    for (i, p) in state.particles.iter().enumerate() {
        refs.push(if i == 4 {
            anchored.add_anchor(p.position)
        } else {
            anchored.add_particle(p.position, DVec3::ZERO, 1.0)
        });
    }
    let faces = state
        .faces
        .iter()
        .map(|f| f.map(|r| refs[r.dynamic().unwrap()]))
        .collect();
    anchored.set_surface(faces, state.face_to_tet.clone()).unwrap();

    let response = CollisionResponse::new(1e-3, 4);
    let mut oracle = BruteForceOracle::new(0.1);
    response.init_oracle(&mut oracle, &anchored);
    let report = response.resolve(&mut oracle, &mut anchored);
    assert_eq!(report.corrections, 0);
    assert!(!report.resolved);
    assert_eq!(anchored.anchors[0].position, DVec3::new(0.2, 0.2, 0.05));
}

#[test]
fn null_oracle_reports_nothing() {
    let mut state = overlapping_tets();
    let report = CollisionResponse::new(1e-3, 4).resolve(&mut NullOracle, &mut state);
    assert!(report.resolved);
    assert_eq!(report.iterations, 1);
    assert_eq!(report.corrections, 0);
}

// ─── Ground Plane Tests ───────────────────────────────────────

#[test]
fn ground_plane_bounces() {
    let mut state = SimulationState::new();
    state.add_particle(DVec3::new(0.0, -0.5, 0.0), DVec3::new(1.0, -2.0, 0.0), 1.0);
    state.add_particle(DVec3::new(0.0, 1.0, 0.0), DVec3::new(0.0, -2.0, 0.0), 1.0);
    let touched = GroundPlane::new(0.0).resolve(&mut state);
    assert_eq!(touched, 1);
    let p = &state.particles[0];
    assert_eq!(p.position.y, 0.0);
    assert!((p.velocity.y - 1.6).abs() < 1e-12);
    assert_eq!(p.velocity.x, 1.0);
    assert_eq!(state.particles[1].position.y, 1.0);
}
