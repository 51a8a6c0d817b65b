//! Sensor feed: a bounded channel into the roughness scorer.
//!
//! The device-rate accelerometer callback enqueues readings without
//! blocking; the ingest task drains them in arrival order into the
//! scorer, so window flushes stay monotonic in sample time and windows
//! never overlap. The stepwise score is published on a `watch` channel
//! and changes at most once per scoring window.

use roughmap_core::scorer::{AccelSample, RoughnessScorer};
use roughmap_core::TuningConfig;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::error::RuntimeError;

/// Messages accepted by the ingest task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorCommand {
    /// One accelerometer reading
    Sample(AccelSample),

    /// Start or stop recording; stopping zeroes the published score
    SetRecording(bool),
}

/// Handle for feeding readings in and observing the score.
pub struct SensorIngest {
    commands: mpsc::Sender<SensorCommand>,
    score: watch::Receiver<f64>,
}

impl SensorIngest {
    /// Spawns the ingest task. `capacity` bounds the sample queue: a
    /// device feed outrunning the drain gets `SensorQueueFull` from
    /// `try_send` instead of blocking inside a sensor callback.
    pub fn spawn(config: &TuningConfig, capacity: usize) -> Self {
        let (command_tx, command_rx) = mpsc::channel(capacity);
        let (score_tx, score_rx) = watch::channel(0.0);

        let scorer = RoughnessScorer::new(config);
        tokio::spawn(run(scorer, command_rx, score_tx));

        Self {
            commands: command_tx,
            score: score_rx,
        }
    }

    /// Non-blocking enqueue for sensor callbacks.
    pub fn try_send(&self, command: SensorCommand) -> Result<(), RuntimeError> {
        self.commands.try_send(command).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => RuntimeError::SensorQueueFull,
            mpsc::error::TrySendError::Closed(_) => RuntimeError::IngestGone,
        })
    }

    /// Awaiting enqueue for non-callback contexts.
    pub async fn send(&self, command: SensorCommand) -> Result<(), RuntimeError> {
        self.commands
            .send(command)
            .await
            .map_err(|_| RuntimeError::IngestGone)
    }

    /// Receiver for the stepwise score in [0, 10].
    pub fn scores(&self) -> watch::Receiver<f64> {
        self.score.clone()
    }
}

async fn run(
    mut scorer: RoughnessScorer,
    mut commands: mpsc::Receiver<SensorCommand>,
    score_tx: watch::Sender<f64>,
) {
    info!("sensor ingest started");

    while let Some(command) = commands.recv().await {
        match command {
            SensorCommand::Sample(sample) => {
                if let Some(score) = scorer.push(sample) {
                    debug!(score, "scoring window flushed");
                    let _ = score_tx.send(score);
                }
            }
            SensorCommand::SetRecording(recording) => {
                info!(recording, "recording state changed");
                scorer.set_recording(recording);
                let _ = score_tx.send(scorer.score());
            }
        }
    }

    debug!("sensor channel closed, ingest exiting");
}
