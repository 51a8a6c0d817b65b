//! Error types for the runtime task layer.

use thiserror::Error;

/// Failures crossing the task boundaries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// The overlay worker's task has exited
    #[error("overlay worker is gone")]
    WorkerGone,

    /// The sensor queue is full; the reading was dropped
    #[error("sensor queue full")]
    SensorQueueFull,

    /// The sensor ingest task has exited
    #[error("sensor ingest is gone")]
    IngestGone,
}
