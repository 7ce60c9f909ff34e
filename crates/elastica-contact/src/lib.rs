//! # elastica-contact
//!
//! Collision handling for deformable bodies.
//!
//! Detection is delegated to a [`CollisionOracle`], which only sees the
//! boundary: surface points by compact index and surface faces. The
//! [`CollisionResponse`] pass keeps the oracle in sync with the simulation
//! state and projects intruding vertices back out of the faces they hit.
//!
//! [`BruteForceOracle`] is a reference oracle that tests every pair.

pub mod brute_force;
pub mod contact;
pub mod geometry;
pub mod ground_plane;
pub mod oracle;
pub mod response;

pub use brute_force::BruteForceOracle;
pub use contact::{Collisions, EdgeEdgeContact, VertexFaceContact};
pub use ground_plane::GroundPlane;
pub use oracle::{CollisionOracle, NullOracle};
pub use response::{CollisionReport, CollisionResponse};
