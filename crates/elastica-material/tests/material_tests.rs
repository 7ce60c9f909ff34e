//! Integration tests for elastica-material.

use elastica_math::{DMat3, DVec3};
use elastica_material::elasticity::{from_voigt, to_voigt};
use elastica_material::strain::{self, deformation_gradient, edge_matrix};
use elastica_material::{ConstitutiveModel, IsotropicElasticity, StrainMode};

fn rest_tet() -> [DVec3; 4] {
    [
        DVec3::ZERO,
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
    ]
}

fn rest_inverse(p: [DVec3; 4]) -> DMat3 {
    edge_matrix(p).inverse()
}

fn elasticity() -> IsotropicElasticity {
    IsotropicElasticity::new(1000.0, 0.3).unwrap()
}

// ─── Deformation Gradient Tests ──────────────────────────────

#[test]
fn rest_configuration_has_identity_gradient() {
    let p = rest_tet();
    let f = deformation_gradient(p, &rest_inverse(p));
    assert!(f.abs_diff_eq(DMat3::IDENTITY, 1e-12));
}

#[test]
fn stretch_gives_expected_strain() {
    let p = rest_tet();
    let inv = rest_inverse(p);
    let stretched = p.map(|x| DVec3::new(x.x * 1.1, x.y, x.z));
    let state = strain::evaluate(StrainMode::Linear, stretched, &inv, &elasticity());
    assert!((state.strain.x_axis.x - 0.1).abs() < 1e-12);
    assert!(state.strain.y_axis.y.abs() < 1e-12);
    assert!(state.norm > 0.0);
}

// ─── Rotation Artifact Tests ─────────────────────────────────

#[test]
fn rigid_rotation_linear_vs_corotational() {
    let p = rest_tet();
    let inv = rest_inverse(p);
    let rot = DMat3::from_rotation_z(std::f64::consts::FRAC_PI_3);
    let offset = DVec3::new(2.0, -1.0, 0.5);
    let rotated = p.map(|x| rot * x + offset);

    let linear = strain::evaluate(StrainMode::Linear, rotated, &inv, &elasticity());
    let corot = strain::evaluate(StrainMode::Corotational, rotated, &inv, &elasticity());

    assert!(
        elastica_math::frobenius_norm(&linear.strain) > 0.1,
        "linear strain should report spurious strain"
    );
    assert!(
        elastica_math::frobenius_norm(&corot.strain) < 1e-12,
        "corotational strain should vanish under rotation"
    );
    assert!(corot.norm < 1e-9);
}

#[test]
fn translation_is_strain_free_in_both_modes() {
    let p = rest_tet();
    let inv = rest_inverse(p);
    let moved = p.map(|x| x + DVec3::splat(3.0));
    for mode in [StrainMode::Linear, StrainMode::Corotational] {
        let s = strain::evaluate(mode, moved, &inv, &elasticity());
        assert!(s.norm < 1e-9, "{mode:?}");
    }
}

#[test]
fn model_names() {
    assert_eq!(StrainMode::Linear.model().name(), "linear");
    assert_eq!(StrainMode::Corotational.model().name(), "co_rotational");
}

#[test]
fn corotational_piola_rotates_with_element() {
    let rot = DMat3::from_rotation_x(0.7);
    let stress = DMat3::from_diagonal(DVec3::new(1.0, 2.0, 3.0));
    let p = StrainMode::Corotational.model().piola(&rot, &stress);
    assert!(p.abs_diff_eq(rot * stress, 1e-12));
    let p_lin = StrainMode::Linear.model().piola(&rot, &stress);
    assert_eq!(p_lin, stress);
}

// ─── Elasticity Operator Tests ───────────────────────────────

#[test]
fn voigt_round_trip_preserves_symmetric_tensor() {
    let m = DMat3::from_cols(
        DVec3::new(1.0, 4.0, 6.0),
        DVec3::new(4.0, 2.0, 5.0),
        DVec3::new(6.0, 5.0, 3.0),
    );
    assert_eq!(to_voigt(&m), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(from_voigt(to_voigt(&m)), m);
}

#[test]
fn uniaxial_stress_matches_operator() {
    let e = elasticity();
    let strain = from_voigt([0.01, 0.0, 0.0, 0.0, 0.0, 0.0]);
    let s = e.stress(&strain);
    let scale = 1000.0 / (1.3 * 0.4);
    assert!((s.x_axis.x - scale * 0.7 * 0.01).abs() < 1e-9);
    assert!((s.y_axis.y - scale * 0.3 * 0.01).abs() < 1e-9);
    assert!((s.z_axis.z - scale * 0.3 * 0.01).abs() < 1e-9);
}

#[test]
fn shear_scaled_by_one_minus_two_v() {
    let e = elasticity();
    let s = e.apply_voigt([0.0, 0.0, 0.0, 0.02, 0.0, 0.0]);
    let scale = 1000.0 / (1.3 * 0.4);
    assert!((s[3] - scale * 0.4 * 0.02).abs() < 1e-9);
}

#[test]
fn lame_parameters_agree_with_operator() {
    let e = elasticity();
    let (lambda, mu) = e.lame();
    let strain = from_voigt([0.01, -0.02, 0.005, 0.003, 0.001, -0.004]);
    let trace = 0.01 - 0.02 + 0.005;
    let expected = DMat3::IDENTITY * (lambda * trace) + strain * (2.0 * mu);
    assert!(e.stress(&strain).abs_diff_eq(expected, 1e-9));
}

#[test]
fn invalid_poisson_rejected() {
    assert!(IsotropicElasticity::new(1.0, 0.5).is_err());
    assert!(IsotropicElasticity::new(1.0, -0.1).is_err());
    assert!(IsotropicElasticity::new(-1.0, 0.2).is_err());
}

#[test]
fn strain_mode_serialization() {
    let json = serde_json::to_string(&StrainMode::Corotational).unwrap();
    assert_eq!(json, "\"corotational\"");
    let back: StrainMode = serde_json::from_str("\"linear\"").unwrap();
    assert_eq!(back, StrainMode::Linear);
}
