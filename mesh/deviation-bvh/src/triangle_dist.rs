//! Closest-point-on-triangle math.
//!
//! Implements the barycentric region classification from "Real-Time
//! Collision Detection" by Christer Ericson, with a segment fallback for
//! degenerate (zero-area) triangles.

use deviation_types::Triangle;
use nalgebra::Point3;

/// Compute the closest point on a line segment to a query point.
///
/// # Example
///
/// ```
/// use deviation_bvh::closest_point_on_segment;
/// use nalgebra::Point3;
///
/// let a = Point3::new(0.0, 0.0, 0.0);
/// let b = Point3::new(10.0, 0.0, 0.0);
/// let c = closest_point_on_segment(Point3::new(-3.0, 4.0, 0.0), a, b);
/// assert!((c - a).norm() < 1e-12); // clamped to the endpoint
/// ```
#[must_use]
pub fn closest_point_on_segment(point: Point3<f64>, a: Point3<f64>, b: Point3<f64>) -> Point3<f64> {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    if len_sq <= f64::EPSILON {
        // Segment collapsed to a point
        return a;
    }
    let t = ((point - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Compute the closest point on a triangle to a query point.
///
/// Classifies the query against the triangle's Voronoi regions: the
/// result is the query's projection when it falls inside the face, and
/// the nearest point of the nearest edge or vertex otherwise. Degenerate
/// triangles are handled by reducing to the segment case; no branch
/// divides by a quantity that can be zero.
///
/// # Example
///
/// ```
/// use deviation_types::{Triangle, Point3};
/// use deviation_bvh::closest_point_on_triangle;
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 0.0, 0.0),
///     Point3::new(5.0, 10.0, 0.0),
/// );
/// let c = closest_point_on_triangle(Point3::new(5.0, 3.0, 4.0), &tri);
/// assert!(c.z.abs() < 1e-12); // projected onto the triangle's plane
/// ```
#[must_use]
#[allow(clippy::many_single_char_names, clippy::similar_names)]
pub fn closest_point_on_triangle(point: Point3<f64>, tri: &Triangle) -> Point3<f64> {
    let (a, b, c) = (tri.v0, tri.v1, tri.v2);

    // A collapsed edge reduces the triangle to a segment; route those to
    // the segment case before any barycentric denominator can vanish.
    if (b - a).norm_squared() <= f64::EPSILON {
        return closest_point_on_segment(point, a, c);
    }
    if (c - a).norm_squared() <= f64::EPSILON || (c - b).norm_squared() <= f64::EPSILON {
        return closest_point_on_segment(point, a, b);
    }

    let ab = b - a;
    let ac = c - a;
    let ap = point - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);

    // Vertex region A
    if d1 <= 0.0 && d2 <= 0.0 {
        return a;
    }

    let bp = point - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);

    // Vertex region B
    if d3 >= 0.0 && d4 <= d3 {
        return b;
    }

    // Edge region AB
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        // d1 - d3 = |ab|^2, nonzero after the collapsed-edge check
        let v = d1 / (d1 - d3);
        return a + ab * v;
    }

    let cp = point - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);

    // Vertex region C
    if d6 >= 0.0 && d5 <= d6 {
        return c;
    }

    // Edge region AC
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + ac * w;
    }

    // Edge region BC
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + (c - b) * w;
    }

    // Face region. For a degenerate triangle the barycentric denominator
    // collapses to zero; fall back to the nearest edge instead of dividing.
    let denom = va + vb + vc;
    if denom.abs() <= f64::EPSILON {
        return closest_on_edges(point, a, b, c);
    }

    let v = vb / denom;
    let w = vc / denom;
    a + ab * v + ac * w
}

/// Nearest point among the three edges of a (possibly degenerate) triangle.
fn closest_on_edges(
    point: Point3<f64>,
    a: Point3<f64>,
    b: Point3<f64>,
    c: Point3<f64>,
) -> Point3<f64> {
    let mut best = closest_point_on_segment(point, a, b);
    let mut best_sq = (best - point).norm_squared();

    for (s, e) in [(b, c), (c, a)] {
        let candidate = closest_point_on_segment(point, s, e);
        let d_sq = (candidate - point).norm_squared();
        if d_sq < best_sq {
            best = candidate;
            best_sq = d_sq;
        }
    }
    best
}
