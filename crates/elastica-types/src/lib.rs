//! # elastica-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the elastica deformable-body engine.
//!
//! This crate has zero domain logic. It defines the vocabulary
//! that all other elastica crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{ElasticaError, ElasticaResult};
pub use ids::ParticleRef;
