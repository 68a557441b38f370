//! Vertex type.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh vertex: a position with an optional unit normal.
///
/// Normals are not required at load time; they can be filled in later via
/// [`crate::IndexedMesh::compute_vertex_normals`].
///
/// # Example
///
/// ```
/// use deviation_types::{Vertex, Point3};
///
/// let v = Vertex::new(Point3::new(1.0, 2.0, 3.0));
/// assert!(v.normal.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in 3D space.
    pub position: Point3<f64>,
    /// Unit normal, averaged from incident faces. `None` until computed.
    pub normal: Option<Vector3<f64>>,
}

impl Vertex {
    /// Create a vertex at the given position with no normal.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: None,
        }
    }

    /// Create a vertex from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use deviation_types::Vertex;
    ///
    /// let v = Vertex::from_coords(0.0, 1.0, 2.0);
    /// assert!((v.position.y - 1.0).abs() < 1e-12);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Create a vertex with a normal attached.
    #[inline]
    #[must_use]
    pub const fn with_normal(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self {
            position,
            normal: Some(normal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_defaults_to_no_normal() {
        let v = Vertex::from_coords(1.0, 2.0, 3.0);
        assert!(v.normal.is_none());
        assert!((v.position.x - 1.0).abs() < f64::EPSILON);
        assert!((v.position.z - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn vertex_with_normal() {
        let v = Vertex::with_normal(Point3::origin(), Vector3::z());
        let n = v.normal;
        assert!(n.is_some());
        assert!((n.map_or(0.0, |n| n.z) - 1.0).abs() < f64::EPSILON);
    }
}
