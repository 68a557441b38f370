//! Indexed triangle mesh.

use crate::{Aabb, Triangle, Vertex};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Stores vertices and faces separately, with faces referencing vertices
/// by index. Both the target and the reference mesh of the deviation
/// pipeline use this type; the pipeline only ever reads a loaded mesh.
///
/// # Example
///
/// ```
/// use deviation_types::{IndexedMesh, Vertex};
///
/// let mut mesh = IndexedMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Create a mesh from raw coordinate and index data.
    ///
    /// This is the boundary with the external mesh loader, which delivers
    /// meshes as flat arrays.
    ///
    /// # Arguments
    ///
    /// * `positions` - Flat vertex positions `[x0, y0, z0, x1, y1, z1, ...]`
    /// * `indices` - Flat face indices `[a0, b0, c0, a1, b1, c1, ...]`
    ///
    /// Returns an empty mesh if either array's length is not divisible by 3.
    ///
    /// # Example
    ///
    /// ```
    /// use deviation_types::IndexedMesh;
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let indices = [0, 1, 2];
    ///
    /// let mesh = IndexedMesh::from_raw(&positions, &indices);
    /// assert_eq!(mesh.vertex_count(), 3);
    /// assert_eq!(mesh.face_count(), 1);
    /// ```
    #[must_use]
    pub fn from_raw(positions: &[f64], indices: &[u32]) -> Self {
        if positions.len() % 3 != 0 || indices.len() % 3 != 0 {
            return Self::new();
        }

        let vertices = positions
            .chunks_exact(3)
            .map(|c| Vertex::from_coords(c[0], c[1], c[2]))
            .collect();

        let faces = indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();

        Self { vertices, faces }
    }

    /// Get the number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no vertices or no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Get a triangle by face index with resolved vertex positions.
    ///
    /// Returns `None` if the face index or any vertex index is out of
    /// bounds.
    #[must_use]
    pub fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let face = self.faces.get(face_index)?;
        Some(Triangle::new(
            self.vertices.get(face[0] as usize)?.position,
            self.vertices.get(face[1] as usize)?.position,
            self.vertices.get(face[2] as usize)?.position,
        ))
    }

    /// Iterate over all faces as triangles with resolved positions.
    ///
    /// Faces with out-of-bounds vertex indices are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.faces.len()).filter_map(|i| self.triangle(i))
    }

    /// Compute the axis-aligned bounding box of all vertices.
    ///
    /// Returns an empty AABB for a mesh with no vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }

    /// Compute per-vertex normals as the area-weighted average of
    /// incident face normals.
    ///
    /// Degenerate faces contribute nothing. Vertices with no incident
    /// non-degenerate face keep `normal = None`.
    ///
    /// # Example
    ///
    /// ```
    /// use deviation_types::IndexedMesh;
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    /// let mut mesh = IndexedMesh::from_raw(&positions, &[0, 1, 2]);
    /// mesh.compute_vertex_normals();
    ///
    /// let n = mesh.vertices[0].normal.unwrap();
    /// assert!((n.z - 1.0).abs() < 1e-10);
    /// ```
    pub fn compute_vertex_normals(&mut self) {
        let mut accumulated = vec![Vector3::zeros(); self.vertices.len()];

        for face in &self.faces {
            let Some(tri) = face_triangle(&self.vertices, face) else {
                continue;
            };
            // Unnormalized cross product weights by 2*area
            let weighted = tri.normal_unnormalized();
            for &vi in face {
                if let Some(slot) = accumulated.get_mut(vi as usize) {
                    *slot += weighted;
                }
            }
        }

        for (vertex, sum) in self.vertices.iter_mut().zip(accumulated) {
            vertex.normal = sum.try_normalize(f64::EPSILON);
        }
    }
}

fn face_triangle(vertices: &[Vertex], face: &[u32; 3]) -> Option<Triangle> {
    Some(Triangle::new(
        vertices.get(face[0] as usize)?.position,
        vertices.get(face[1] as usize)?.position,
        vertices.get(face[2] as usize)?.position,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad_mesh() -> IndexedMesh {
        // Two coplanar triangles forming a unit quad at z=0
        let positions = [
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 1.0, 0.0,
        ];
        IndexedMesh::from_raw(&positions, &[0, 1, 2, 0, 2, 3])
    }

    #[test]
    fn from_raw_rejects_ragged_input() {
        let mesh = IndexedMesh::from_raw(&[0.0, 1.0], &[0, 1, 2]);
        assert!(mesh.is_empty());

        let mesh = IndexedMesh::from_raw(&[0.0, 0.0, 0.0], &[0, 1]);
        assert!(mesh.is_empty());
    }

    #[test]
    fn triangle_resolves_positions() {
        let mesh = quad_mesh();
        match mesh.triangle(1) {
            Some(tri) => assert_relative_eq!(tri.v2.y, 1.0),
            None => panic!("face 1 should resolve"),
        }
        assert!(mesh.triangle(2).is_none());
    }

    #[test]
    fn triangles_iterates_all_faces() {
        let mesh = quad_mesh();
        assert_eq!(mesh.triangles().count(), 2);
        let total_area: f64 = mesh.triangles().map(|t| t.area()).sum();
        assert_relative_eq!(total_area, 1.0, epsilon = 1e-10);
    }

    #[test]
    fn bounds_of_quad() {
        let mesh = quad_mesh();
        let b = mesh.bounds();
        assert_relative_eq!(b.min.x, 0.0);
        assert_relative_eq!(b.max.y, 1.0);
        assert_relative_eq!(b.size().z, 0.0);
    }

    #[test]
    fn vertex_normals_on_flat_quad_point_up() {
        let mut mesh = quad_mesh();
        mesh.compute_vertex_normals();
        for v in &mesh.vertices {
            let n = v.normal;
            assert!(n.is_some());
            assert_relative_eq!(n.map_or(0.0, |n| n.z), 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn vertex_normals_skip_degenerate_faces() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0];
        let mut mesh = IndexedMesh::from_raw(&positions, &[0, 1, 2]);
        mesh.compute_vertex_normals();
        assert!(mesh.vertices.iter().all(|v| v.normal.is_none()));
    }
}
