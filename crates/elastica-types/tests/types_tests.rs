//! Integration tests for elastica-types.

use elastica_types::{ElasticaError, ParticleRef};

#[test]
fn signed_round_trip_dynamic() {
    let r = ParticleRef::from_signed(7);
    assert_eq!(r, ParticleRef::Dynamic(7));
    assert_eq!(r.to_signed(), 7);
    assert_eq!(r.dynamic(), Some(7));
}

#[test]
fn signed_negative_maps_to_anchor() {
    assert_eq!(ParticleRef::from_signed(-1), ParticleRef::Anchor(0));
    assert_eq!(ParticleRef::from_signed(-3), ParticleRef::Anchor(2));
    assert_eq!(ParticleRef::Anchor(2).to_signed(), -3);
    assert!(ParticleRef::Anchor(0).is_anchor());
    assert_eq!(ParticleRef::Anchor(0).dynamic(), None);
}

#[test]
fn particle_ref_serialization() {
    let r = ParticleRef::Anchor(3);
    let json = serde_json::to_string(&r).unwrap();
    let back: ParticleRef = serde_json::from_str(&json).unwrap();
    assert_eq!(back, r);
}

#[test]
fn error_display() {
    let e = ElasticaError::UnknownScene("nope".into());
    assert_eq!(e.to_string(), "Unknown scene: nope");
}
