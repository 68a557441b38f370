//! Per-vertex surface deviation field.
//!
//! For every vertex of a *target* mesh, this crate records the Euclidean
//! distance to the closest point on a *reference* surface (queried
//! through a pre-built [`deviation_bvh::TriangleBvh`]), together with the
//! running minimum and maximum of all distances. The resulting
//! [`DeviationField`] is pure derived data: it is recomputed in full
//! whenever either mesh changes and never updated incrementally.
//!
//! A missing or empty reference surface is not an error. The builder
//! degrades to an empty field, and consumers fall back to an uncolored
//! surface.
//!
//! # Example
//!
//! ```
//! use deviation_types::IndexedMesh;
//! use deviation_bvh::{BvhParams, TriangleBvh};
//! use deviation_field::{compute_deviation, FieldParams};
//!
//! let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
//! let reference = IndexedMesh::from_raw(&positions, &[0, 1, 2]);
//! let target = IndexedMesh::from_raw(&[0.0, 0.0, 5.0], &[]);
//!
//! let bvh = TriangleBvh::build(&reference, &BvhParams::default());
//! let field = compute_deviation(&target, &bvh, &FieldParams::default());
//!
//! assert_eq!(field.len(), 1);
//! assert!((field.distances()[0] - 5.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod builder;
mod field;

pub use builder::{compute_deviation, FieldParams};
pub use field::DeviationField;
