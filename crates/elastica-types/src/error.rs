//! Error types for the elastica engine.
//!
//! Setup-time operations return `ElasticaResult<T>`. Per-frame physics never
//! fails: degenerate geometry and solver non-convergence are recovered
//! locally and reported through step results instead.

use thiserror::Error;

/// Unified error type for the elastica engine.
#[derive(Debug, Error)]
pub enum ElasticaError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Topology construction referenced something that does not exist.
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A linear solve could not be set up (dimension mismatch, failed factorization).
    #[error("Linear solver error: {0}")]
    LinearSolver(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Requested scene preset is unknown.
    #[error("Unknown scene: {0}")]
    UnknownScene(String),
}

/// Convenience alias for `Result<T, ElasticaError>`.
pub type ElasticaResult<T> = Result<T, ElasticaError>;
