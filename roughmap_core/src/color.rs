//! Roughness-to-color mapping.
//!
//! Colors travel through the pipeline as structured RGB triples and are
//! rendered to text only at the output boundary. Two mappings exist:
//! - a continuous green -> yellow -> red gradient for route sub-segments
//! - a discrete four-bucket mapping for standalone point markers

use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Renders the CSS form `rgb(r, g, b)`. Output boundary only: nothing in
/// the pipeline parses this back.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Steady blue assigned to sub-segments with no colored neighbor in range.
pub const GAP_FALLBACK: Rgb = Rgb::new(59, 130, 246);

/// Continuous gradient: green (smooth) through yellow to red (rough).
///
/// Input is clamped to [0, 10]. Red is non-decreasing and green is
/// non-increasing over the full range; blue is always 0.
pub fn color_for_roughness(roughness: f64) -> Rgb {
    let clamped = roughness.clamp(0.0, 10.0);

    if clamped <= 5.0 {
        // 0..=5: green pegged at 255, red sweeps 0 -> 255
        let r = ((clamped / 5.0) * 255.0).round() as u8;
        Rgb::new(r, 255, 0)
    } else {
        // 5..=10: red pegged at 255, green sweeps 255 -> 0
        let g = ((1.0 - (clamped - 5.0) / 5.0) * 255.0).round() as u8;
        Rgb::new(255, g, 0)
    }
}

/// Discrete bucket mapping used for point markers.
///
/// Markers are colored independently of the route overlay; buckets read
/// better than a gradient at dot size.
pub fn marker_color(roughness: f64) -> Rgb {
    if roughness < 2.0 {
        Rgb::new(0, 255, 0)
    } else if roughness < 5.0 {
        Rgb::new(255, 255, 0)
    } else if roughness < 8.0 {
        Rgb::new(255, 165, 0)
    } else {
        Rgb::new(255, 0, 0)
    }
}
