//! Color mapping for deviation display.
//!
//! Converts per-vertex deviation distances into surface colors and legend
//! data. Distances are normalized against the field's min/max and mapped
//! onto a hue ramp restricted to two-thirds of the hue wheel: blue for
//! low deviation, red for high. Stopping at two-thirds avoids the
//! wrap-around ambiguity where red and violet meet.
//!
//! Everything here is pure data — no drawing, no state.
//!
//! # Example
//!
//! ```
//! use deviation_color::{normalize, ramp_color, Legend, LegendParams};
//!
//! let t = normalize(2.5, 0.0, 10.0);
//! assert!((t - 0.25).abs() < 1e-12);
//!
//! let low = ramp_color(0.0); // blue
//! assert!(low.b > 0.9 && low.r < 0.1);
//!
//! let legend = Legend::build(0.0, 10.0, &LegendParams::default());
//! assert_eq!(legend.colors().len(), 128);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod legend;
mod ramp;
mod rgb;

pub use legend::{Legend, LegendParams, LegendTick};
pub use ramp::{normalize, ramp_color, ramp_hue_degrees};
pub use rgb::Rgb;
