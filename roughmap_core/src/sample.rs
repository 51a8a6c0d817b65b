//! Geolocated roughness samples and the speed adjustment applied to them.

use crate::config::TuningConfig;
use crate::geo::LatLng;
use serde::{Deserialize, Serialize};

/// One recorded road-roughness observation.
///
/// Produced by combining a position fix with the scorer's current output;
/// immutable once created. The speed/sensitivity-adjusted roughness is
/// derived on demand and never stored back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoughnessSample {
    pub position: LatLng,

    /// Unix milliseconds at capture
    pub timestamp_ms: i64,

    /// Raw scorer output in [0, 10]
    pub roughness: f64,

    /// Travel speed at capture, if the fix carried one (km/h, non-negative)
    pub speed_kmh: Option<f64>,

    /// Compass heading at capture, if the fix carried one ([0, 360) degrees)
    pub heading_deg: Option<f64>,
}

impl RoughnessSample {
    /// A sample without motion metadata.
    pub fn new(position: LatLng, timestamp_ms: i64, roughness: f64) -> Self {
        Self {
            position,
            timestamp_ms,
            roughness,
            speed_kmh: None,
            heading_deg: None,
        }
    }

    /// A sample carrying the fix's speed and heading.
    pub fn with_motion(
        position: LatLng,
        timestamp_ms: i64,
        roughness: f64,
        speed_kmh: Option<f64>,
        heading_deg: Option<f64>,
    ) -> Self {
        Self {
            position,
            timestamp_ms,
            roughness,
            speed_kmh,
            heading_deg,
        }
    }

    /// Roughness scaled by sensitivity and discounted by travel speed.
    ///
    /// The same physical disturbance reads as less rough at higher speed.
    /// The discount ramps linearly across the configured speed band and
    /// saturates beyond it; a `speed_influence` of 0 disables the effect
    /// regardless of speed, as does an absent speed.
    pub fn adjusted_roughness(&self, config: &TuningConfig) -> f64 {
        let mut adjusted = self.roughness * config.sensitivity;

        if let Some(speed) = self.speed_kmh {
            let factor = ((speed - config.min_speed_kmh)
                / (config.max_speed_kmh - config.min_speed_kmh))
                .clamp(0.0, 1.0);
            adjusted *= 1.0 - factor * config.speed_influence;
        }

        adjusted
    }
}

/// Converts a positioning-API speed in m/s to km/h.
pub fn kmh_from_ms(speed_ms: f64) -> f64 {
    speed_ms * 3.6
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_with_speed(roughness: f64, speed_kmh: Option<f64>) -> RoughnessSample {
        RoughnessSample::with_motion(LatLng::new(0.0, 0.0), 0, roughness, speed_kmh, None)
    }

    #[test]
    fn test_no_speed_applies_sensitivity_only() {
        let config = TuningConfig::new(2.0, 1.0).unwrap();
        let sample = sample_with_speed(3.0, None);
        assert_relative_eq!(sample.adjusted_roughness(&config), 6.0);
    }

    #[test]
    fn test_speed_at_band_floor_gives_no_reduction() {
        let config = TuningConfig::new(1.0, 1.0).unwrap();
        let sample = sample_with_speed(4.0, Some(20.0));
        assert_relative_eq!(sample.adjusted_roughness(&config), 4.0);
    }

    #[test]
    fn test_speed_below_band_floor_gives_no_reduction() {
        let config = TuningConfig::new(1.0, 1.0).unwrap();
        let sample = sample_with_speed(4.0, Some(5.0));
        assert_relative_eq!(sample.adjusted_roughness(&config), 4.0);
    }

    #[test]
    fn test_speed_at_band_ceiling_gives_full_reduction() {
        let config = TuningConfig::new(1.0, 0.5).unwrap();
        let sample = sample_with_speed(4.0, Some(100.0));
        // factor 1.0, influence 0.5 -> half the roughness remains
        assert_relative_eq!(sample.adjusted_roughness(&config), 2.0);
    }

    #[test]
    fn test_speed_beyond_band_ceiling_saturates() {
        let config = TuningConfig::new(1.0, 1.0).unwrap();
        let sample = sample_with_speed(4.0, Some(250.0));
        assert_relative_eq!(sample.adjusted_roughness(&config), 0.0);
    }

    #[test]
    fn test_zero_influence_ignores_speed() {
        let config = TuningConfig::new(1.5, 0.0).unwrap();
        let sample = sample_with_speed(4.0, Some(100.0));
        assert_relative_eq!(sample.adjusted_roughness(&config), 6.0);
    }

    #[test]
    fn test_mid_band_speed_scales_linearly() {
        let config = TuningConfig::new(1.0, 1.0).unwrap();
        let sample = sample_with_speed(10.0, Some(60.0));
        // factor (60-20)/80 = 0.5 -> 10 * (1 - 0.5)
        assert_relative_eq!(sample.adjusted_roughness(&config), 5.0);
    }

    #[test]
    fn test_kmh_from_ms() {
        assert_relative_eq!(kmh_from_ms(10.0), 36.0);
    }
}
