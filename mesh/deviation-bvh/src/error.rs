//! Error types for spatial index queries.

use thiserror::Error;

/// Result type for spatial index operations.
pub type BvhResult<T> = Result<T, BvhError>;

/// Errors that can occur when querying the spatial index.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BvhError {
    /// The index was built from a mesh with no triangles, so there is no
    /// reference surface to measure against.
    #[error("no reference surface: the spatial index contains no triangles")]
    EmptyIndex,
}
