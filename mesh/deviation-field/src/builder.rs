//! Deviation field computation.

use deviation_bvh::TriangleBvh;
use deviation_types::IndexedMesh;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::field::DeviationField;

/// Parameters for deviation field computation.
#[derive(Debug, Clone)]
pub struct FieldParams {
    /// Distribute vertex queries across the rayon thread pool.
    /// Queries are independent and the index is read-only, so the
    /// parallel and sequential paths produce identical fields.
    pub parallel: bool,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl FieldParams {
    /// Force the sequential code path.
    #[must_use]
    pub const fn sequential() -> Self {
        Self { parallel: false }
    }
}

/// Compute the deviation field of a target mesh against a reference
/// surface.
///
/// Issues one closest-point query per target vertex and records the
/// Euclidean distance. Vertices are independent; with
/// `params.parallel` each worker writes only its own slice of the
/// output.
///
/// An empty spatial index (no reference surface) or an empty target mesh
/// yields an empty field — never an error.
///
/// # Example
///
/// ```
/// use deviation_types::IndexedMesh;
/// use deviation_bvh::{BvhParams, TriangleBvh};
/// use deviation_field::{compute_deviation, FieldParams};
///
/// // No reference surface: the field degrades to unavailable
/// let empty_bvh = TriangleBvh::build(&IndexedMesh::new(), &BvhParams::default());
/// let target = IndexedMesh::from_raw(&[0.0, 0.0, 0.0], &[]);
/// let field = compute_deviation(&target, &empty_bvh, &FieldParams::default());
/// assert!(field.is_empty());
/// ```
#[must_use]
pub fn compute_deviation(
    target: &IndexedMesh,
    index: &TriangleBvh,
    params: &FieldParams,
) -> DeviationField {
    if index.is_empty() {
        debug!("no reference surface; deviation field unavailable");
        return DeviationField::empty();
    }
    if target.vertices.is_empty() {
        debug!("target mesh has no vertices; deviation field empty");
        return DeviationField::empty();
    }

    let query = |position| {
        // The index was checked non-empty above, so the query cannot
        // fail; should that invariant ever break, infinity cannot be
        // mistaken for a measured distance
        index
            .closest(position)
            .map_or(f64::INFINITY, |hit| hit.distance)
    };

    let distances: Vec<f64> = if params.parallel {
        target
            .vertices
            .par_iter()
            .map(|v| query(v.position))
            .collect()
    } else {
        target.vertices.iter().map(|v| query(v.position)).collect()
    };

    let field = DeviationField::from_distances(distances);
    if let Some((min, max)) = field.range() {
        info!(
            vertices = field.len(),
            min = format!("{min:.6}"),
            max = format!("{max:.6}"),
            "computed deviation field"
        );
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use deviation_bvh::BvhParams;
    use deviation_types::Vertex;

    fn unit_triangle() -> IndexedMesh {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        IndexedMesh::from_raw(&positions, &[0, 1, 2])
    }

    fn point_cloud(points: &[(f64, f64, f64)]) -> IndexedMesh {
        let vertices = points
            .iter()
            .map(|&(x, y, z)| Vertex::from_coords(x, y, z))
            .collect();
        IndexedMesh::from_parts(vertices, Vec::new())
    }

    #[test]
    fn vertex_above_triangle_measures_height() {
        let reference = unit_triangle();
        let target = point_cloud(&[(0.0, 0.0, 5.0)]);

        let bvh = TriangleBvh::build(&reference, &BvhParams::default());
        let field = compute_deviation(&target, &bvh, &FieldParams::default());

        assert_eq!(field.len(), 1);
        assert_relative_eq!(field.distances()[0], 5.0, epsilon = 1e-12);
        assert_eq!(field.range(), Some((5.0, 5.0)));
    }

    #[test]
    fn coincident_vertex_measures_zero() {
        let reference = unit_triangle();
        let target = point_cloud(&[(1.0, 0.0, 0.0)]);

        let bvh = TriangleBvh::build(&reference, &BvhParams::default());
        let field = compute_deviation(&target, &bvh, &FieldParams::default());

        assert_relative_eq!(field.distances()[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_reference_yields_unavailable_field() {
        let target = point_cloud(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 0.0),
            (2.0, 0.0, 0.0),
            (3.0, 0.0, 0.0),
            (4.0, 0.0, 0.0),
            (5.0, 0.0, 0.0),
            (6.0, 0.0, 0.0),
            (7.0, 0.0, 0.0),
            (8.0, 0.0, 0.0),
            (9.0, 0.0, 0.0),
        ]);
        let bvh = TriangleBvh::build(&IndexedMesh::new(), &BvhParams::default());

        let field = compute_deviation(&target, &bvh, &FieldParams::default());
        assert!(field.is_empty());
        assert!(field.range().is_none());
    }

    #[test]
    fn degenerate_reference_yields_finite_distances() {
        // The reference's only face repeats a vertex index (collapsed edge)
        let reference = IndexedMesh::from_raw(&[0.0, 0.0, 0.0, 0.0, 1.0, 0.0], &[0, 0, 1]);
        let target = point_cloud(&[(0.0, 0.5, 2.0)]);

        let bvh = TriangleBvh::build(&reference, &BvhParams::default());
        let field = compute_deviation(&target, &bvh, &FieldParams::default());

        assert!(field.distances().iter().all(|d| d.is_finite()));
        assert_relative_eq!(field.distances()[0], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn field_length_matches_vertex_count() {
        let reference = unit_triangle();
        let target = point_cloud(&[(0.0, 0.0, 1.0), (0.5, 0.2, 2.0), (3.0, 3.0, 0.0)]);

        let bvh = TriangleBvh::build(&reference, &BvhParams::default());
        let field = compute_deviation(&target, &bvh, &FieldParams::default());

        assert_eq!(field.len(), target.vertex_count());
        assert!(field.distances().iter().all(|&d| d >= 0.0));
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let reference = unit_triangle();
        let target = point_cloud(&[
            (0.1, 0.1, 1.0),
            (-2.0, 0.5, 0.3),
            (0.7, 0.9, -4.0),
            (5.0, 5.0, 5.0),
        ]);
        let bvh = TriangleBvh::build(&reference, &BvhParams::default());

        let parallel = compute_deviation(&target, &bvh, &FieldParams::default());
        let sequential = compute_deviation(&target, &bvh, &FieldParams::sequential());

        assert_eq!(parallel.len(), sequential.len());
        for (a, b) in parallel.distances().iter().zip(sequential.distances()) {
            assert_relative_eq!(*a, *b, epsilon = 0.0);
        }
    }

    #[test]
    fn min_and_max_track_extremes() {
        let reference = unit_triangle();
        let target = point_cloud(&[(0.0, 0.0, 1.0), (0.0, 0.0, 3.0), (0.0, 0.0, 2.0)]);

        let bvh = TriangleBvh::build(&reference, &BvhParams::default());
        let field = compute_deviation(&target, &bvh, &FieldParams::default());

        let (min, max) = field.range().unwrap_or((0.0, 0.0));
        assert_relative_eq!(min, 1.0, epsilon = 1e-12);
        assert_relative_eq!(max, 3.0, epsilon = 1e-12);
    }
}
