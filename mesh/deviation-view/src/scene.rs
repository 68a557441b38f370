//! The deviation scene context.

use deviation_bvh::{BvhParams, TriangleBvh};
use deviation_field::{compute_deviation, DeviationField, FieldParams};
use deviation_types::IndexedMesh;
use tracing::{debug, info, warn};

/// Owns the meshes under comparison and the data derived from them.
///
/// The target mesh is the surface being displayed; the reference mesh,
/// when present, is the surface it is measured against. Loading either
/// mesh bumps the [`generation`](Self::generation) counter, drops the
/// derived data, and rebuilds it synchronously: the spatial index over
/// the reference triangles and the per-vertex deviation field.
///
/// Callers that move the field computation off-thread instead capture
/// `generation()` before starting and hand the result back through
/// [`apply_field`](Self::apply_field); results for a superseded
/// generation are discarded.
#[derive(Debug, Default)]
pub struct DeviationScene {
    target: IndexedMesh,
    reference: Option<IndexedMesh>,
    index: Option<TriangleBvh>,
    field: DeviationField,
    generation: u64,
    bvh_params: BvhParams,
    field_params: FieldParams,
}

impl DeviationScene {
    /// Create an empty scene with default build parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene with explicit index and field parameters.
    #[must_use]
    pub fn with_params(bvh_params: BvhParams, field_params: FieldParams) -> Self {
        Self {
            bvh_params,
            field_params,
            ..Self::default()
        }
    }

    /// Load the target mesh (the surface being displayed).
    ///
    /// Vertex normals are computed on load so the renderer can shade the
    /// surface. The deviation field is recomputed against the current
    /// reference surface, if any.
    pub fn set_target(&mut self, mut target: IndexedMesh) {
        target.compute_vertex_normals();
        info!(
            vertices = target.vertex_count(),
            faces = target.face_count(),
            "target mesh loaded"
        );
        self.target = target;
        self.generation += 1;
        self.recompute_field();
    }

    /// Load the reference mesh (the surface deviation is measured
    /// against) and rebuild the spatial index over it.
    pub fn set_reference(&mut self, reference: IndexedMesh) {
        info!(
            vertices = reference.vertex_count(),
            faces = reference.face_count(),
            "reference mesh loaded"
        );
        let index = TriangleBvh::build(&reference, &self.bvh_params);
        debug!(stats = ?index.stats(), "reference index built");
        self.reference = Some(reference);
        self.index = Some(index);
        self.generation += 1;
        self.recompute_field();
    }

    /// Drop the reference mesh and all data derived from it.
    ///
    /// The target reverts to flat, uncolored rendering.
    pub fn clear_reference(&mut self) {
        self.reference = None;
        self.index = None;
        self.field = DeviationField::empty();
        self.generation += 1;
        debug!("reference surface cleared");
    }

    fn recompute_field(&mut self) {
        self.field = match &self.index {
            Some(index) => compute_deviation(&self.target, index, &self.field_params),
            None => DeviationField::empty(),
        };
    }

    /// The generation the scene is currently at.
    ///
    /// Bumped by every mesh load or clear. Capture it before scheduling
    /// an off-thread field computation and pass it to
    /// [`apply_field`](Self::apply_field) with the result.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Install an externally computed deviation field.
    ///
    /// Returns `false` and discards the field if `generation` no longer
    /// matches the scene — a newer mesh load has superseded the
    /// computation (last load wins).
    pub fn apply_field(&mut self, generation: u64, field: DeviationField) -> bool {
        if generation != self.generation {
            warn!(
                stale = generation,
                current = self.generation,
                "discarding deviation field for superseded scene"
            );
            return false;
        }
        self.field = field;
        true
    }

    /// The target mesh.
    #[must_use]
    pub fn target(&self) -> &IndexedMesh {
        &self.target
    }

    /// The reference mesh, if one is loaded.
    #[must_use]
    pub fn reference(&self) -> Option<&IndexedMesh> {
        self.reference.as_ref()
    }

    /// The spatial index over the reference surface, if one is loaded.
    #[must_use]
    pub fn index(&self) -> Option<&TriangleBvh> {
        self.index.as_ref()
    }

    /// The current deviation field.
    #[must_use]
    pub fn field(&self) -> &DeviationField {
        &self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle_at(z: f64) -> IndexedMesh {
        let positions = [0.0, 0.0, z, 1.0, 0.0, z, 0.0, 1.0, z];
        IndexedMesh::from_raw(&positions, &[0, 1, 2])
    }

    #[test]
    fn empty_scene_has_no_derived_data() {
        let scene = DeviationScene::new();
        assert!(scene.reference().is_none());
        assert!(scene.index().is_none());
        assert!(scene.field().is_empty());
    }

    #[test]
    fn loading_both_meshes_yields_a_field() {
        let mut scene = DeviationScene::new();
        scene.set_target(unit_triangle_at(2.0));
        scene.set_reference(unit_triangle_at(0.0));

        assert_eq!(scene.field().len(), 3);
        let (min, max) = scene.field().range().unwrap_or((-1.0, -1.0));
        assert_relative_eq!(min, 2.0, epsilon = 1e-12);
        assert_relative_eq!(max, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn load_order_does_not_matter() {
        let mut a = DeviationScene::new();
        a.set_target(unit_triangle_at(1.0));
        a.set_reference(unit_triangle_at(0.0));

        let mut b = DeviationScene::new();
        b.set_reference(unit_triangle_at(0.0));
        b.set_target(unit_triangle_at(1.0));

        assert_eq!(a.field().distances(), b.field().distances());
    }

    #[test]
    fn target_load_computes_normals() {
        let mut scene = DeviationScene::new();
        scene.set_target(unit_triangle_at(0.0));
        assert!(scene
            .target()
            .vertices
            .iter()
            .all(|v| v.normal.is_some()));
    }

    #[test]
    fn clearing_reference_drops_the_field() {
        let mut scene = DeviationScene::new();
        scene.set_target(unit_triangle_at(1.0));
        scene.set_reference(unit_triangle_at(0.0));
        assert!(!scene.field().is_empty());

        scene.clear_reference();
        assert!(scene.index().is_none());
        assert!(scene.field().is_empty());
    }

    #[test]
    fn every_mutation_bumps_the_generation() {
        let mut scene = DeviationScene::new();
        let g0 = scene.generation();

        scene.set_target(unit_triangle_at(0.0));
        let g1 = scene.generation();
        assert!(g1 > g0);

        scene.set_reference(unit_triangle_at(0.0));
        let g2 = scene.generation();
        assert!(g2 > g1);

        scene.clear_reference();
        assert!(scene.generation() > g2);
    }

    #[test]
    fn apply_field_accepts_the_current_generation() {
        let mut scene = DeviationScene::new();
        scene.set_target(unit_triangle_at(1.0));
        scene.set_reference(unit_triangle_at(0.0));

        let generation = scene.generation();
        let replacement = DeviationField::from_distances(vec![9.0, 9.0, 9.0]);
        assert!(scene.apply_field(generation, replacement));
        assert_eq!(scene.field().range(), Some((9.0, 9.0)));
    }

    #[test]
    fn apply_field_rejects_a_superseded_generation() {
        let mut scene = DeviationScene::new();
        scene.set_target(unit_triangle_at(1.0));
        scene.set_reference(unit_triangle_at(0.0));

        let stale = scene.generation();
        scene.set_target(unit_triangle_at(3.0));

        let before = scene.field().distances().to_vec();
        let rejected = DeviationField::from_distances(vec![9.0, 9.0, 9.0]);
        assert!(!scene.apply_field(stale, rejected));
        assert_eq!(scene.field().distances(), before.as_slice());
    }
}
