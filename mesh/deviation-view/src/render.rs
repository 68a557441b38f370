//! Render-data assembly.

use deviation_color::{normalize, ramp_color, Legend, LegendParams, Rgb};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::scene::DeviationScene;

/// Everything the renderer needs to draw one frame of the overlay.
///
/// Pure data: per-vertex colors parallel to the target vertices, legend
/// gradient and ticks, and preformatted range labels. `vertex_colors` is
/// `None` when no reference surface is loaded — the renderer should draw
/// the whole target in [`RenderData::flat_color`] and skip the legend
/// entirely. An empty color vector, by contrast, just means the target
/// has no vertices.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderData {
    /// Per-vertex colors, or `None` for flat uncolored rendering.
    pub vertex_colors: Option<Vec<Rgb>>,
    /// Legend gradient and ticks, when a deviation range exists.
    pub legend: Option<Legend>,
    /// The (min, max) deviation range behind the colors.
    pub range: Option<(f64, f64)>,
    /// Preformatted minimum label, e.g. `"min: 0.001234"`.
    pub min_label: Option<String>,
    /// Preformatted maximum label, e.g. `"max: 2.345678"`.
    pub max_label: Option<String>,
}

impl RenderData {
    /// The color for the whole surface when `vertex_colors` is `None`.
    #[must_use]
    pub const fn flat_color() -> Rgb {
        Rgb::FLAT_GRAY
    }
}

impl DeviationScene {
    /// Assemble render data for the current scene state.
    ///
    /// Each vertex distance is normalized against the field range and
    /// mapped through the hue ramp: blue at the minimum deviation, red
    /// at the maximum.
    #[must_use]
    pub fn render_data(&self, params: &LegendParams) -> RenderData {
        if self.index().is_none() {
            debug!("no reference surface; rendering flat");
            return RenderData::default();
        }

        let field = self.field();
        let Some((min, max)) = field.range() else {
            // Reference loaded but the target has no vertices
            return RenderData {
                vertex_colors: Some(Vec::new()),
                ..RenderData::default()
            };
        };

        let vertex_colors = field
            .distances()
            .iter()
            .map(|&d| ramp_color(normalize(d, min, max)))
            .collect();

        RenderData {
            vertex_colors: Some(vertex_colors),
            legend: Some(Legend::build(min, max, params)),
            range: Some((min, max)),
            min_label: Some(format!("min: {min:.6}")),
            max_label: Some(format!("max: {max:.6}")),
        }
    }
}
