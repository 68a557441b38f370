//! Scene context and render-data adapter for deviation display.
//!
//! [`DeviationScene`] owns the target mesh, the optional reference mesh,
//! and everything derived from them: the spatial index over the reference
//! surface and the per-vertex deviation field. Loading a mesh invalidates
//! the derived data and rebuilds it; a generation counter lets externally
//! scheduled recomputation detect that its result went stale.
//!
//! [`RenderData`] is the hand-off to the renderer: per-vertex colors,
//! legend data, and range labels. `vertex_colors: None` signals "draw the
//! surface flat and uncolored" when no reference surface is loaded.
//! Nothing in this crate draws.
//!
//! # Example
//!
//! ```
//! use deviation_types::IndexedMesh;
//! use deviation_color::LegendParams;
//! use deviation_view::DeviationScene;
//!
//! let mut scene = DeviationScene::new();
//! scene.set_target(IndexedMesh::from_raw(
//!     &[0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0],
//!     &[0, 1, 2],
//! ));
//!
//! // No reference surface yet: flat rendering
//! let data = scene.render_data(&LegendParams::default());
//! assert!(data.vertex_colors.is_none());
//!
//! scene.set_reference(IndexedMesh::from_raw(
//!     &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
//!     &[0, 1, 2],
//! ));
//! let data = scene.render_data(&LegendParams::default());
//! assert_eq!(data.vertex_colors.map(|c| c.len()), Some(3));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod render;
mod scene;

pub use render::RenderData;
pub use scene::DeviationScene;
