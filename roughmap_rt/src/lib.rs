//! Roughmap Runtime - Task Plumbing Around the Pure Core
//!
//! Two independent cadences exist and share no mutable state:
//! - **Sensor ingestion**: the accelerometer feed drains through a bounded
//!   channel into the roughness scorer, publishing a stepwise score
//! - **Overlay recomputation**: route/sample/view snapshots drive the
//!   segment-colorize-fill pipeline off the interactive path, with
//!   last-write-wins snapshot replacement and memoization
//!
//! All coordination is channel-based snapshot replacement; there are no
//! locks to take anywhere.

mod error;
mod ingest;
mod worker;

pub use error::RuntimeError;
pub use ingest::{SensorCommand, SensorIngest};
pub use worker::OverlayWorker;
