//! # elastica-mesh
//!
//! Tetrahedral mesh representation produced by the topology generator
//! and consumed once per scene setup.
//!
//! ## Key Types
//!
//! - [`TetMesh`]: points, tetrahedra, surface faces, and the face → tet map.
//! - Procedural generators ([`generators::bar`], [`generators::single_tet`]).
//! - [`io::load_json`]: file loading that yields `None` on failure.

pub mod generators;
pub mod io;
pub mod mesh;

pub use mesh::TetMesh;
