//! Collision oracle trait.
//!
//! The oracle owns its own spatial structures. The simulation pushes
//! boundary positions into it and pulls contacts out.

use elastica_math::DVec3;

use crate::contact::Collisions;

/// Geometric collision detection over the boundary mesh.
///
/// ```text
/// oracle.init_system(points, faces);
/// loop {
///     oracle.update_vertex(i, p);   // for moved boundary points
///     let hits = oracle.get_collisions();
/// }
/// ```
pub trait CollisionOracle: Send {
    /// (Re)builds the oracle from boundary points and faces given as
    /// compact point indices.
    fn init_system(&mut self, positions: &[DVec3], faces: &[[u32; 3]]);

    /// Informs the oracle that boundary point `index` moved.
    fn update_vertex(&mut self, index: u32, position: DVec3);

    /// Returns the contacts at the current positions.
    fn get_collisions(&mut self) -> Collisions;

    /// Returns the oracle's name.
    fn name(&self) -> &str;
}

/// Oracle that never reports contacts.
#[derive(Debug, Default)]
pub struct NullOracle;

impl CollisionOracle for NullOracle {
    fn init_system(&mut self, _positions: &[DVec3], _faces: &[[u32; 3]]) {}

    fn update_vertex(&mut self, _index: u32, _position: DVec3) {}

    fn get_collisions(&mut self) -> Collisions {
        Collisions::default()
    }

    fn name(&self) -> &str {
        "null_oracle"
    }
}
