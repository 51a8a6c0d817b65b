//! Discrete point markers for individual samples.
//!
//! Markers are colored independently per sample, not per route
//! sub-segment, and use the bucket mapping rather than the gradient.

use crate::color::{self, Rgb};
use crate::config::TuningConfig;
use crate::geo::LatLng;
use crate::sample::RoughnessSample;
use serde::{Deserialize, Serialize};

/// Speed above which a marker is considered directional (km/h).
const DIRECTIONAL_MIN_SPEED_KMH: f64 = 1.0;

/// A single sample rendered as a standalone dot or arrow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: LatLng,
    pub color: Rgb,

    /// Adjusted roughness the color was derived from
    pub roughness: f64,

    pub speed_kmh: Option<f64>,
    pub heading_deg: Option<f64>,
}

impl Marker {
    /// True when the sample was moving with a known heading; the renderer
    /// draws these as oriented arrows instead of dots.
    pub fn is_directional(&self) -> bool {
        self.heading_deg.is_some()
            && self.speed_kmh.is_some_and(|s| s > DIRECTIONAL_MIN_SPEED_KMH)
    }
}

/// One marker per sample, adjusted with the active config and clamped to
/// [0, 10] before bucket mapping.
pub fn markers(samples: &[RoughnessSample], config: &TuningConfig) -> Vec<Marker> {
    samples
        .iter()
        .map(|sample| {
            let adjusted = sample.adjusted_roughness(config).clamp(0.0, 10.0);
            Marker {
                position: sample.position,
                color: color::marker_color(adjusted),
                roughness: adjusted,
                speed_kmh: sample.speed_kmh,
                heading_deg: sample.heading_deg,
            }
        })
        .collect()
}
