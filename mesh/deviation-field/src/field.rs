//! The deviation field container.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-vertex deviation distances with their range.
///
/// Parallel to the target mesh's vertex sequence: entry `i` is the
/// distance from target vertex `i` to the closest point on the reference
/// surface. Every entry is nonnegative.
///
/// An empty field means "no deviation data" — either no reference surface
/// was loaded or the target mesh has no vertices. Callers should treat
/// the overlay as unavailable in that case.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviationField {
    distances: Vec<f64>,
    min: f64,
    max: f64,
}

impl DeviationField {
    /// Create an empty (unavailable) field.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            distances: Vec::new(),
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Create a field from a distance array, computing its range.
    ///
    /// # Example
    ///
    /// ```
    /// use deviation_field::DeviationField;
    ///
    /// let field = DeviationField::from_distances(vec![1.0, 3.0, 2.0]);
    /// assert_eq!(field.range(), Some((1.0, 3.0)));
    /// ```
    #[must_use]
    pub fn from_distances(distances: Vec<f64>) -> Self {
        let (min, max) = distances.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), &d| (lo.min(d), hi.max(d)),
        );
        Self { distances, min, max }
    }

    /// Get the per-vertex distances, parallel to the target vertices.
    #[must_use]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Get the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Check if the field holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Get the distance for a vertex index, if present.
    #[must_use]
    pub fn get(&self, vertex: usize) -> Option<f64> {
        self.distances.get(vertex).copied()
    }

    /// Get the (min, max) distance range, or `None` for an empty field.
    #[must_use]
    pub fn range(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            None
        } else {
            Some((self.min, self.max))
        }
    }
}
