//! BVH construction and nearest-primitive queries.

// Face counts fit u32; mesh sizes make the casts safe in practice.
#![allow(clippy::cast_possible_truncation)]

use deviation_types::{Aabb, IndexedMesh, Point3, Triangle};
use smallvec::SmallVec;
use tracing::debug;

use crate::error::{BvhError, BvhResult};
use crate::triangle_dist::closest_point_on_triangle;

/// Parameters controlling BVH construction.
#[derive(Debug, Clone)]
pub struct BvhParams {
    /// Maximum triangles per leaf node.
    pub max_leaf_size: usize,

    /// Subtree size above which construction recurses in parallel.
    pub parallel_threshold: usize,
}

impl Default for BvhParams {
    fn default() -> Self {
        Self {
            max_leaf_size: 8,
            parallel_threshold: 4096,
        }
    }
}

impl BvhParams {
    /// Set the maximum leaf size (clamped to at least 1).
    #[must_use]
    pub fn max_leaf_size(mut self, size: usize) -> Self {
        self.max_leaf_size = size.max(1);
        self
    }

    /// Set the parallel construction threshold.
    #[must_use]
    pub const fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }
}

/// Result of a closest-point query: the nearest point on the reference
/// surface, the face it lies on, and the Euclidean distance to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Closest point on the surface.
    pub point: Point3<f64>,
    /// Index of the reference-mesh face containing the closest point.
    /// When the query point is equidistant to several touching faces,
    /// any one of their indices may be reported.
    pub face: u32,
    /// Euclidean distance from the query point to `point`.
    pub distance: f64,
}

/// BVH node: a leaf holding triangle indices, or an internal node whose
/// box encloses both children.
#[derive(Debug)]
enum BvhNode {
    Leaf {
        bbox: Aabb,
        triangles: SmallVec<[u32; 8]>,
    },
    Internal {
        bbox: Aabb,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
}

impl BvhNode {
    const fn bbox(&self) -> &Aabb {
        match self {
            Self::Leaf { bbox, .. } | Self::Internal { bbox, .. } => bbox,
        }
    }
}

/// A bounding-volume hierarchy over the triangles of a reference mesh.
///
/// Built once per reference-mesh load, then queried read-only; rebuild by
/// calling [`TriangleBvh::build`] again after a reload. The index owns a
/// copy of every triangle in face order, so a triangle's index doubles as
/// its source face identifier.
///
/// # Example
///
/// ```
/// use deviation_types::IndexedMesh;
/// use deviation_bvh::{BvhParams, TriangleBvh};
/// use nalgebra::Point3;
///
/// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// let mesh = IndexedMesh::from_raw(&positions, &[0, 1, 2]);
/// let bvh = TriangleBvh::build(&mesh, &BvhParams::default());
///
/// assert_eq!(bvh.triangle_count(), 1);
/// assert!(bvh.closest(Point3::origin()).is_ok());
/// ```
#[derive(Debug)]
pub struct TriangleBvh {
    root: Option<BvhNode>,
    triangles: Vec<Triangle>,
}

impl TriangleBvh {
    /// Build a BVH from the faces of a mesh.
    ///
    /// Splits at the median along the longest axis of each subtree's
    /// bounding box, giving an O(F log F) build and O(log F) depth.
    /// Subtrees larger than `params.parallel_threshold` are built in
    /// parallel. An empty mesh yields an empty index whose queries fail
    /// with [`BvhError::EmptyIndex`].
    #[must_use]
    pub fn build(mesh: &IndexedMesh, params: &BvhParams) -> Self {
        let triangles: Vec<Triangle> = mesh.triangles().collect();
        if triangles.is_empty() {
            return Self {
                root: None,
                triangles,
            };
        }

        let boxes: Vec<Aabb> = triangles.iter().map(Triangle::bounds).collect();
        let centroids: Vec<Point3<f64>> = triangles.iter().map(Triangle::centroid).collect();
        let mut indices: Vec<u32> = (0..triangles.len() as u32).collect();

        let max_leaf = params.max_leaf_size.max(1);
        let root = build_node(&boxes, &centroids, &mut indices, max_leaf, params.parallel_threshold);

        let bvh = Self {
            root: Some(root),
            triangles,
        };

        let stats = bvh.stats();
        debug!(
            triangles = bvh.triangles.len(),
            leaves = stats.leaf_count,
            depth = stats.max_depth,
            "built triangle BVH"
        );

        bvh
    }

    /// Find the closest point on the reference surface to `point`.
    ///
    /// Branch-and-bound traversal: descend the nearer child first, prune
    /// any subtree whose bounding box is already farther than the best
    /// candidate. The returned distance equals the exhaustive minimum
    /// over all triangles.
    ///
    /// # Errors
    ///
    /// Returns [`BvhError::EmptyIndex`] if the index holds no triangles.
    pub fn closest(&self, point: Point3<f64>) -> BvhResult<SurfaceHit> {
        let root = self.root.as_ref().ok_or(BvhError::EmptyIndex)?;

        let mut best = Candidate {
            dist_sq: f64::INFINITY,
            point,
            face: 0,
        };
        self.search(root, point, &mut best);

        Ok(SurfaceHit {
            point: best.point,
            face: best.face,
            distance: best.dist_sq.sqrt(),
        })
    }

    fn search(&self, node: &BvhNode, query: Point3<f64>, best: &mut Candidate) {
        match node {
            BvhNode::Leaf { triangles, .. } => {
                for &idx in triangles {
                    let candidate = closest_point_on_triangle(query, &self.triangles[idx as usize]);
                    let dist_sq = (candidate - query).norm_squared();
                    if dist_sq < best.dist_sq {
                        best.dist_sq = dist_sq;
                        best.point = candidate;
                        best.face = idx;
                    }
                }
            }
            BvhNode::Internal { left, right, .. } => {
                let d_left = left.bbox().distance_squared_to(&query);
                let d_right = right.bbox().distance_squared_to(&query);

                // Nearer child first tightens the bound before the far
                // subtree is considered
                let (near, near_d, far, far_d) = if d_left <= d_right {
                    (left, d_left, right, d_right)
                } else {
                    (right, d_right, left, d_left)
                };

                if near_d < best.dist_sq {
                    self.search(near, query, best);
                }
                if far_d < best.dist_sq {
                    self.search(far, query, best);
                }
            }
        }
    }

    /// Get the number of triangles in the index.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the index holds no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Get the bounding box of the whole reference surface.
    #[must_use]
    pub fn root_bounds(&self) -> Option<&Aabb> {
        self.root.as_ref().map(BvhNode::bbox)
    }

    /// Get a triangle by its face identifier.
    #[must_use]
    pub fn triangle(&self, face: u32) -> Option<&Triangle> {
        self.triangles.get(face as usize)
    }

    /// Collect structural statistics, mainly for diagnostics logging.
    #[must_use]
    pub fn stats(&self) -> BvhStats {
        let mut stats = BvhStats::default();
        if let Some(ref root) = self.root {
            collect_stats(root, 0, &mut stats);
        }
        stats
    }
}

struct Candidate {
    dist_sq: f64,
    point: Point3<f64>,
    face: u32,
}

fn build_node(
    boxes: &[Aabb],
    centroids: &[Point3<f64>],
    indices: &mut [u32],
    max_leaf_size: usize,
    parallel_threshold: usize,
) -> BvhNode {
    let mut bbox = Aabb::empty();
    for &i in indices.iter() {
        bbox = bbox.union(&boxes[i as usize]);
    }

    if indices.len() <= max_leaf_size {
        return BvhNode::Leaf {
            bbox,
            triangles: indices.iter().copied().collect(),
        };
    }

    // Median split along the longest axis of the subtree's extent
    let axis = bbox.longest_axis();
    indices.sort_unstable_by(|&a, &b| {
        let va = centroids[a as usize][axis];
        let vb = centroids[b as usize][axis];
        va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mid = indices.len() / 2;
    let (left_indices, right_indices) = indices.split_at_mut(mid);

    let (left, right) = if subtree_is_large(left_indices, right_indices, parallel_threshold) {
        rayon::join(
            || build_node(boxes, centroids, left_indices, max_leaf_size, parallel_threshold),
            || build_node(boxes, centroids, right_indices, max_leaf_size, parallel_threshold),
        )
    } else {
        (
            build_node(boxes, centroids, left_indices, max_leaf_size, parallel_threshold),
            build_node(boxes, centroids, right_indices, max_leaf_size, parallel_threshold),
        )
    };

    BvhNode::Internal {
        bbox,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn subtree_is_large(left: &[u32], right: &[u32], threshold: usize) -> bool {
    left.len() >= threshold || right.len() >= threshold
}

fn collect_stats(node: &BvhNode, depth: usize, stats: &mut BvhStats) {
    stats.max_depth = stats.max_depth.max(depth);
    match node {
        BvhNode::Leaf { triangles, .. } => {
            stats.leaf_count += 1;
            stats.max_leaf_size = stats.max_leaf_size.max(triangles.len());
            stats.triangles_in_leaves += triangles.len();
        }
        BvhNode::Internal { left, right, .. } => {
            stats.internal_count += 1;
            collect_stats(left, depth + 1, stats);
            collect_stats(right, depth + 1, stats);
        }
    }
}

/// Statistics about the BVH structure.
#[derive(Debug, Default, Clone)]
pub struct BvhStats {
    /// Number of internal (branch) nodes.
    pub internal_count: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Maximum depth of the tree.
    pub max_depth: usize,
    /// Largest number of triangles in any leaf.
    pub max_leaf_size: usize,
    /// Total triangles stored across all leaves.
    pub triangles_in_leaves: usize,
}
