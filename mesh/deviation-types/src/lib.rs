//! Core geometry types for mesh deviation measurement.
//!
//! This crate provides the foundational types shared by the deviation
//! pipeline:
//!
//! - [`Vertex`] - A point in 3D space with an optional normal
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with resolved vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Mesh Roles
//!
//! The deviation pipeline works with two independent meshes: a *target*
//! mesh (the subject of measurement) and a *reference* mesh (the
//! measurement basis). Both use [`IndexedMesh`]; they share no indices.
//! Meshes are append-only at load time and read-only afterwards.
//!
//! # Units & Coordinates
//!
//! All coordinates are `f64` and unit-agnostic. The coordinate system is
//! right-handed; face winding is counter-clockwise when viewed from
//! outside, so face normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use deviation_types::{IndexedMesh, Vertex, Point3};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use mesh::IndexedMesh;
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
