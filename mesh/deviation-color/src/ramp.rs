//! Normalization and the deviation hue ramp.

use crate::rgb::Rgb;

/// Fraction of the hue wheel the ramp spans (blue at 0.67, red at 0).
/// Restricting to two-thirds keeps the high end at pure red instead of
/// wrapping into violet.
const HUE_SPAN: f64 = 0.67;

/// Normalize a distance into [0, 1] against a field range.
///
/// Computed as `(distance - min) / (max - min)` and clamped to [0, 1].
/// When `max <= min` (a degenerate range, e.g. identical meshes) every
/// input maps to 0.0 rather than dividing by zero.
///
/// # Example
///
/// ```
/// use deviation_color::normalize;
///
/// assert!((normalize(5.0, 0.0, 10.0) - 0.5).abs() < 1e-12);
/// assert!((normalize(0.0, 0.0, 10.0)).abs() < 1e-12);
/// assert!((normalize(10.0, 0.0, 10.0) - 1.0).abs() < 1e-12);
/// assert!((normalize(7.0, 3.0, 3.0)).abs() < 1e-12); // degenerate
/// ```
#[must_use]
pub fn normalize(distance: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 {
        return 0.0;
    }
    ((distance - min) / span).clamp(0.0, 1.0)
}

/// Hue (in degrees) for a normalized deviation.
///
/// Monotonically non-increasing in `t`: 241.2° (blue) at `t = 0` down to
/// 0° (red) at `t = 1`. Inputs outside [0, 1] are clamped.
#[must_use]
pub fn ramp_hue_degrees(t: f64) -> f64 {
    (1.0 - t.clamp(0.0, 1.0)) * HUE_SPAN * 360.0
}

/// Map a normalized deviation to a color.
///
/// Full saturation and value at the hue given by [`ramp_hue_degrees`]:
/// blue = low deviation, red = high deviation. Total over all finite
/// inputs; out-of-range `t` is clamped, never a panic.
///
/// # Example
///
/// ```
/// use deviation_color::ramp_color;
///
/// let high = ramp_color(1.0);
/// assert!(high.r > 0.9 && high.b < 0.1); // red
/// ```
#[must_use]
pub fn ramp_color(t: f64) -> Rgb {
    hsv_to_rgb(ramp_hue_degrees(t), 1.0, 1.0)
}

/// Convert an HSV triple (hue in degrees, s and v in [0, 1]) to RGB.
#[allow(clippy::cast_possible_truncation)]
fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgb {
    let h = hue.rem_euclid(360.0);
    let c = value * saturation;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = value - c;

    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    Rgb::new((r + m) as f32, (g + m) as f32, (b + m) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_maps_endpoints() {
        assert_relative_eq!(normalize(2.0, 2.0, 8.0), 0.0);
        assert_relative_eq!(normalize(8.0, 2.0, 8.0), 1.0);
        assert_relative_eq!(normalize(5.0, 2.0, 8.0), 0.5);
    }

    #[test]
    fn normalize_clamps_outliers() {
        assert_relative_eq!(normalize(-10.0, 0.0, 1.0), 0.0);
        assert_relative_eq!(normalize(10.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn normalize_degenerate_range_is_zero() {
        assert_relative_eq!(normalize(5.0, 3.0, 3.0), 0.0);
        assert_relative_eq!(normalize(0.0, 3.0, 3.0), 0.0);
        // Inverted range behaves like degenerate, not a fault
        assert_relative_eq!(normalize(5.0, 8.0, 2.0), 0.0);
    }

    #[test]
    fn hue_is_monotonically_non_increasing() {
        let mut previous = f64::INFINITY;
        for i in 0..=100 {
            let t = f64::from(i) / 100.0;
            let hue = ramp_hue_degrees(t);
            assert!(hue <= previous, "hue increased at t={t}");
            previous = hue;
        }
    }

    #[test]
    fn ramp_endpoints_are_blue_and_red() {
        let low = ramp_color(0.0);
        assert!(low.b > 0.9, "low deviation should be blue, got {low:?}");
        assert!(low.r < 0.1);

        let high = ramp_color(1.0);
        assert!(high.r > 0.9, "high deviation should be red, got {high:?}");
        assert!(high.g < 0.05);
        assert!(high.b < 0.05);
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(ramp_color(-3.0), ramp_color(0.0));
        assert_eq!(ramp_color(42.0), ramp_color(1.0));
        assert_relative_eq!(ramp_hue_degrees(2.0), 0.0);
    }

    #[test]
    fn hsv_primaries() {
        let red = hsv_to_rgb(0.0, 1.0, 1.0);
        assert_relative_eq!(red.r, 1.0);
        assert_relative_eq!(red.g, 0.0);

        let green = hsv_to_rgb(120.0, 1.0, 1.0);
        assert_relative_eq!(green.g, 1.0);

        let blue = hsv_to_rgb(240.0, 1.0, 1.0);
        assert_relative_eq!(blue.b, 1.0);
        assert_relative_eq!(blue.r, 0.0);
    }

    #[test]
    fn hsv_zero_saturation_is_gray() {
        let gray = hsv_to_rgb(180.0, 0.0, 0.5);
        assert_relative_eq!(gray.r, 0.5);
        assert_relative_eq!(gray.g, 0.5);
        assert_relative_eq!(gray.b, 0.5);
    }
}
