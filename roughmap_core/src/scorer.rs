//! Accelerometer stream to periodic roughness score.
//!
//! Consumes device-rate 3-axis acceleration-including-gravity readings and
//! produces a stepwise score in [0, 10], updated at most once per scoring
//! window. Windows are measured against the time of the previous flush,
//! not a fixed timer, so they stay monotonic and never overlap.

use crate::config::TuningConfig;
use nalgebra::Vector3;

/// A single 3-axis acceleration-including-gravity reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelSample {
    /// Unix milliseconds at capture
    pub timestamp_ms: i64,

    /// Acceleration in m/s², gravity included
    pub accel: Vector3<f64>,
}

impl AccelSample {
    pub fn new(timestamp_ms: i64, x: f64, y: f64, z: f64) -> Self {
        Self {
            timestamp_ms,
            accel: Vector3::new(x, y, z),
        }
    }
}

/// Rolling-window roughness scorer.
///
/// Per sample the deviation of the acceleration magnitude from resting
/// gravity is accumulated; once the window elapses the mean deviation is
/// normalized against `deviation_cap` onto the [0, 10] scale. Magnitude
/// rather than a single axis keeps the score usable regardless of device
/// orientation.
#[derive(Debug, Clone)]
pub struct RoughnessScorer {
    gravity: f64,
    deviation_cap: f64,
    window_ms: i64,
    window: Vec<f64>,
    last_flush_ms: Option<i64>,
    score: f64,
    recording: bool,
}

impl RoughnessScorer {
    pub fn new(config: &TuningConfig) -> Self {
        Self {
            gravity: config.gravity,
            deviation_cap: config.deviation_cap,
            window_ms: config.score_window_ms as i64,
            window: Vec::new(),
            last_flush_ms: None,
            score: 0.0,
            recording: false,
        }
    }

    /// Current stepwise score in [0, 10].
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Starts or stops ingestion. Stopping zeroes the score immediately
    /// and drops the partially accumulated window.
    pub fn set_recording(&mut self, recording: bool) {
        if self.recording && !recording {
            self.score = 0.0;
            self.window.clear();
            self.last_flush_ms = None;
        }
        self.recording = recording;
    }

    /// Ingests one reading. Returns the new score when this sample closed
    /// a window, `None` otherwise. Samples are ignored while not recording.
    pub fn push(&mut self, sample: AccelSample) -> Option<f64> {
        if !self.recording {
            return None;
        }

        let deviation = (sample.accel.norm() - self.gravity).abs();
        self.window.push(deviation);

        // The first sample after (re)activation opens the window
        let last = *self.last_flush_ms.get_or_insert(sample.timestamp_ms);
        if sample.timestamp_ms - last <= self.window_ms {
            return None;
        }

        let mean = self.window.iter().sum::<f64>() / self.window.len() as f64;
        self.score = ((mean / self.deviation_cap) * 10.0).min(10.0);
        self.window.clear();
        self.last_flush_ms = Some(sample.timestamp_ms);
        Some(self.score)
    }
}
