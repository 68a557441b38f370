//! RGB color type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An RGB color with components in [0, 1].
///
/// # Example
///
/// ```
/// use deviation_color::Rgb;
///
/// let c = Rgb::new(1.0, 0.5, 0.0);
/// assert_eq!(c.to_bytes(), [255, 127, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
}

impl Rgb {
    /// Create a color from components.
    #[inline]
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert to 8-bit components, clamping to the valid range.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    // Truncation and sign loss are safe: values are clamped to [0, 1] before * 255
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0) as u8,
            (self.g.clamp(0.0, 1.0) * 255.0) as u8,
            (self.b.clamp(0.0, 1.0) * 255.0) as u8,
        ]
    }

    /// Neutral gray used for uncolored surfaces.
    pub const FLAT_GRAY: Self = Self::new(0.75, 0.75, 0.75);
}
