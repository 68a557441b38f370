//! Legend gradient and tick data.

use crate::ramp::ramp_color;
use crate::rgb::Rgb;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for legend generation.
#[derive(Debug, Clone)]
pub struct LegendParams {
    /// Number of gradient colors (bands) in the legend.
    pub bands: usize,
    /// Number of evenly spaced tick labels.
    pub ticks: usize,
}

impl Default for LegendParams {
    fn default() -> Self {
        Self {
            bands: 128,
            ticks: 6,
        }
    }
}

/// A tick label on the legend.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LegendTick {
    /// The deviation value this tick labels.
    pub value: f64,
    /// Normalized vertical position: 0.0 at the top of the legend
    /// (maximum) down to 1.0 at the bottom (minimum).
    pub position: f64,
}

/// Pure legend data: a vertical color gradient plus tick labels.
///
/// Colors are ordered from the bottom of the legend rectangle (low
/// deviation, blue) to the top (high deviation, red); ticks run the
/// other way, maximum first. The renderer decides geometry — this type
/// carries no pixel coordinates.
///
/// # Example
///
/// ```
/// use deviation_color::{Legend, LegendParams, ramp_color};
///
/// let legend = Legend::build(0.0, 10.0, &LegendParams::default());
/// assert_eq!(legend.colors()[0], ramp_color(0.0));
/// assert_eq!(legend.colors()[127], ramp_color(1.0));
/// assert_eq!(legend.ticks().len(), 6);
/// assert!((legend.ticks()[0].value - 10.0).abs() < 1e-12); // max at top
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Legend {
    colors: Vec<Rgb>,
    ticks: Vec<LegendTick>,
}

impl Legend {
    /// Build legend data for a deviation range.
    ///
    /// `bands` and `ticks` are clamped to at least 2 so the gradient and
    /// the label sequence always have distinct endpoints.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn build(min: f64, max: f64, params: &LegendParams) -> Self {
        let bands = params.bands.max(2);
        let ticks = params.ticks.max(2);

        let colors = (0..bands)
            .map(|i| ramp_color(i as f64 / (bands - 1) as f64))
            .collect();

        let ticks = (0..ticks)
            .map(|i| {
                let position = i as f64 / (ticks - 1) as f64;
                LegendTick {
                    value: (max - min).mul_add(1.0 - position, min),
                    position,
                }
            })
            .collect();

        Self { colors, ticks }
    }

    /// The gradient colors, bottom (low) to top (high).
    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Number of drawable gradient bands (adjacent color pairs).
    #[must_use]
    pub fn band_count(&self) -> usize {
        self.colors.len() - 1
    }

    /// The color pair bounding band `i`, for renderers that draw the
    /// gradient as interpolated quads.
    #[must_use]
    pub fn band(&self, i: usize) -> Option<(Rgb, Rgb)> {
        match (self.colors.get(i), self.colors.get(i + 1)) {
            (Some(&lo), Some(&hi)) => Some((lo, hi)),
            _ => None,
        }
    }

    /// Tick labels, ordered from the maximum (top) to the minimum
    /// (bottom).
    #[must_use]
    pub fn ticks(&self) -> &[LegendTick] {
        &self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ramp::ramp_hue_degrees;
    use approx::assert_relative_eq;

    #[test]
    fn default_legend_shape() {
        let legend = Legend::build(0.0, 10.0, &LegendParams::default());
        assert_eq!(legend.colors().len(), 128);
        assert_eq!(legend.band_count(), 127);
        assert_eq!(legend.ticks().len(), 6);
    }

    #[test]
    fn gradient_endpoints_match_ramp() {
        let legend = Legend::build(0.0, 10.0, &LegendParams::default());
        assert_eq!(legend.colors()[0], ramp_color(0.0));
        assert_eq!(legend.colors()[127], ramp_color(1.0));
    }

    #[test]
    fn gradient_hue_is_monotonic_across_bands() {
        let params = LegendParams::default();
        let bands = params.bands;
        let mut previous = f64::INFINITY;
        #[allow(clippy::cast_precision_loss)]
        for i in 0..bands {
            let hue = ramp_hue_degrees(i as f64 / (bands - 1) as f64);
            assert!(hue <= previous, "hue increased at band {i}");
            previous = hue;
        }
    }

    #[test]
    fn ticks_run_from_max_to_min() {
        let legend = Legend::build(2.0, 12.0, &LegendParams::default());
        let ticks = legend.ticks();

        assert_relative_eq!(ticks[0].value, 12.0);
        assert_relative_eq!(ticks[0].position, 0.0);
        assert_relative_eq!(ticks[5].value, 2.0);
        assert_relative_eq!(ticks[5].position, 1.0);

        // Evenly spaced
        for pair in ticks.windows(2) {
            assert_relative_eq!(pair[0].value - pair[1].value, 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn band_pairs_are_adjacent_colors() {
        let legend = Legend::build(0.0, 1.0, &LegendParams { bands: 4, ticks: 2 });
        let (lo, hi) = legend.band(0).unwrap_or((Rgb::default(), Rgb::default()));
        assert_eq!(lo, legend.colors()[0]);
        assert_eq!(hi, legend.colors()[1]);
        assert!(legend.band(3).is_none());
    }

    #[test]
    fn degenerate_range_yields_flat_ticks() {
        let legend = Legend::build(3.0, 3.0, &LegendParams::default());
        for tick in legend.ticks() {
            assert_relative_eq!(tick.value, 3.0);
        }
    }

    #[test]
    fn tiny_requests_are_clamped() {
        let legend = Legend::build(0.0, 1.0, &LegendParams { bands: 0, ticks: 1 });
        assert_eq!(legend.colors().len(), 2);
        assert_eq!(legend.ticks().len(), 2);
    }
}
