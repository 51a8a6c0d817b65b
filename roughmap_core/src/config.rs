//! Tuning configuration supplied by the host application's settings layer.
//!
//! Read-only to the core: a recomputation pass sees one immutable copy,
//! and runtime changes become visible with the next pass.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected tuning values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("sensitivity {0} outside [0.5, 3.0]")]
    SensitivityOutOfRange(f64),

    #[error("speed influence {0} outside [0.0, 1.0]")]
    SpeedInfluenceOutOfRange(f64),

    #[error("speed band inverted: min {min} km/h >= max {max} km/h")]
    InvertedSpeedBand { min: f64, max: f64 },
}

/// Tuning knobs for roughness scoring and color adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TuningConfig {
    /// Multiplier applied to raw roughness (user-adjustable, [0.5, 3.0])
    pub sensitivity: f64,

    /// Strength of the speed discount, 0 disables it (user-adjustable, [0, 1])
    pub speed_influence: f64,

    /// Speed at or below which no discount applies (default: 20 km/h)
    pub min_speed_kmh: f64,

    /// Speed at which the discount saturates (default: 100 km/h)
    pub max_speed_kmh: f64,

    /// Resting acceleration magnitude (default: 9.8 m/s²)
    pub gravity: f64,

    /// Mean deviation that maps to the maximum score (default: 5.0 m/s²)
    pub deviation_cap: f64,

    /// Scoring window length (default: 500 ms)
    pub score_window_ms: u64,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            speed_influence: 0.5,
            min_speed_kmh: 20.0,
            max_speed_kmh: 100.0,
            gravity: 9.8,
            deviation_cap: 5.0,
            score_window_ms: 500,
        }
    }
}

impl TuningConfig {
    /// Builds a config from the two user-adjustable knobs, keeping the
    /// remaining fields at their defaults.
    pub fn new(sensitivity: f64, speed_influence: f64) -> Result<Self, ConfigError> {
        let config = Self {
            sensitivity,
            speed_influence,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.5..=3.0).contains(&self.sensitivity) {
            return Err(ConfigError::SensitivityOutOfRange(self.sensitivity));
        }
        if !(0.0..=1.0).contains(&self.speed_influence) {
            return Err(ConfigError::SpeedInfluenceOutOfRange(self.speed_influence));
        }
        if self.min_speed_kmh >= self.max_speed_kmh {
            return Err(ConfigError::InvertedSpeedBand {
                min: self.min_speed_kmh,
                max: self.max_speed_kmh,
            });
        }
        Ok(())
    }
}
