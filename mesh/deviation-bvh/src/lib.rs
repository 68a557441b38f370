//! Bounding-volume hierarchy for nearest-surface queries.
//!
//! This crate builds a BVH over the triangles of a reference mesh and
//! answers closest-point queries against it: given a point anywhere in
//! space, find the globally closest point on the mesh surface, the face
//! it lies on, and the Euclidean distance.
//!
//! A naive scan is O(F) per query; with tens of thousands of reference
//! faces and one query per target vertex that becomes the bottleneck of
//! the whole deviation pipeline. The BVH brings each query down to
//! roughly O(log F) via branch-and-bound: subtrees whose bounding box is
//! farther than the best candidate found so far are pruned, and the
//! nearer child is visited first to tighten the bound early.
//!
//! The tree is immutable after construction, so queries may run
//! concurrently from any number of threads without locking.
//!
//! # Example
//!
//! ```
//! use deviation_types::IndexedMesh;
//! use deviation_bvh::{BvhParams, TriangleBvh};
//! use nalgebra::Point3;
//!
//! let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
//! let mesh = IndexedMesh::from_raw(&positions, &[0, 1, 2]);
//!
//! let bvh = TriangleBvh::build(&mesh, &BvhParams::default());
//! let hit = bvh.closest(Point3::new(0.0, 0.0, 5.0)).unwrap();
//! assert!((hit.distance - 5.0).abs() < 1e-12);
//! assert_eq!(hit.face, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bvh;
mod error;
mod triangle_dist;

pub use bvh::{BvhParams, BvhStats, SurfaceHit, TriangleBvh};
pub use error::{BvhError, BvhResult};
pub use triangle_dist::{closest_point_on_segment, closest_point_on_triangle};
