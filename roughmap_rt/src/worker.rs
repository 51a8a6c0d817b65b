//! Background overlay recomputation with last-write-wins snapshots.
//!
//! The worker owns one input `watch` slot and one output `watch` slot.
//! Submitting a snapshot replaces the slot; the worker always computes
//! the newest snapshot it can see and discards an in-flight result when
//! a newer snapshot arrived while it ran. Intermediate snapshots may
//! never be computed at all; no partial results are ever merged across
//! snapshots.

use std::sync::Arc;

use roughmap_core::pipeline::{ColoredSegment, OverlayCache, Snapshot};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::RuntimeError;

/// Handle for submitting snapshots and observing overlay results.
///
/// Dropping the handle closes the input channel and lets the worker task
/// exit once its current pass finishes.
pub struct OverlayWorker {
    input: watch::Sender<Option<Snapshot>>,
    output: watch::Receiver<Arc<Vec<ColoredSegment>>>,
}

impl OverlayWorker {
    /// Spawns the recomputation task on the current tokio runtime.
    pub fn spawn() -> Self {
        let (input_tx, input_rx) = watch::channel(None);
        let (output_tx, output_rx) = watch::channel(Arc::new(Vec::new()));

        tokio::spawn(run(input_rx, output_tx));

        Self {
            input: input_tx,
            output: output_rx,
        }
    }

    /// Replaces the pending input snapshot.
    pub fn submit(&self, snapshot: Snapshot) -> Result<(), RuntimeError> {
        self.input
            .send(Some(snapshot))
            .map_err(|_| RuntimeError::WorkerGone)
    }

    /// Receiver for the most recently published overlay.
    pub fn overlays(&self) -> watch::Receiver<Arc<Vec<ColoredSegment>>> {
        self.output.clone()
    }
}

async fn run(
    mut input: watch::Receiver<Option<Snapshot>>,
    output: watch::Sender<Arc<Vec<ColoredSegment>>>,
) {
    let mut cache = OverlayCache::new();
    info!("overlay worker started");

    loop {
        if input.changed().await.is_err() {
            debug!("snapshot channel closed, overlay worker exiting");
            return;
        }

        let snapshot = match input.borrow_and_update().clone() {
            Some(snapshot) => snapshot,
            None => continue,
        };

        // The pass is CPU-bound (segments × samples in the worst case);
        // keep it off the async threads
        let local_cache = std::mem::take(&mut cache);
        let result = tokio::task::spawn_blocking(move || {
            let mut local_cache = local_cache;
            let overlay = local_cache.overlay(&snapshot);
            (local_cache, overlay)
        })
        .await;

        let overlay = match result {
            Ok((returned_cache, overlay)) => {
                cache = returned_cache;
                overlay
            }
            Err(err) => {
                warn!("recomputation task failed: {err}");
                continue;
            }
        };

        // Last write wins: a snapshot that arrived mid-pass supersedes
        // this result
        if input.has_changed().unwrap_or(false) {
            debug!(
                segments = overlay.len(),
                "discarding stale overlay, newer snapshot pending"
            );
            continue;
        }

        debug!(segments = overlay.len(), "publishing overlay");
        if output.send(overlay).is_err() {
            debug!("overlay receiver dropped, worker exiting");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roughmap_core::{LatLng, RoughnessSample, TuningConfig, ViewContext};
    use std::time::Duration;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    // Held a hair under the nominal length so chunk counts do not ceil
    // past the expected value on floating-point noise
    fn equatorial_route(length_m: f64) -> Vec<LatLng> {
        let lng = length_m * (1.0 - 1e-9) / (6_371_000.0 * std::f64::consts::PI / 180.0);
        vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, lng)]
    }

    fn snapshot(route: Vec<LatLng>, samples: Vec<RoughnessSample>, zoom: f64) -> Snapshot {
        let camera = route[0];
        Snapshot::new(
            Arc::new(route),
            Arc::new(samples),
            ViewContext::new(zoom, camera),
            TuningConfig::default(),
        )
    }

    async fn wait_for_len(
        rx: &mut watch::Receiver<Arc<Vec<ColoredSegment>>>,
        len: usize,
    ) -> Arc<Vec<ColoredSegment>> {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                if rx.borrow_and_update().len() == len {
                    return rx.borrow().clone();
                }
                rx.changed().await.expect("worker exited early");
            }
        })
        .await
        .expect("overlay never reached expected size")
    }

    #[tokio::test]
    async fn test_worker_publishes_overlay_for_snapshot() {
        init_tracing();
        let worker = OverlayWorker::spawn();
        let mut overlays = worker.overlays();

        worker
            .submit(snapshot(equatorial_route(100.0), Vec::new(), 16.0))
            .unwrap();

        // 100 m at 5 m chunks
        let overlay = wait_for_len(&mut overlays, 20).await;
        assert!(overlay.iter().all(|seg| seg.color == roughmap_core::Rgb::new(59, 130, 246)));
    }

    #[tokio::test]
    async fn test_worker_converges_on_newest_snapshot() {
        let worker = OverlayWorker::spawn();
        let mut overlays = worker.overlays();

        // Rapid-fire submissions: whatever the worker is doing, the
        // published overlay must end up reflecting the last snapshot
        for zoom in [9.0, 11.0, 13.0, 16.0] {
            worker
                .submit(snapshot(equatorial_route(1000.0), Vec::new(), zoom))
                .unwrap();
        }

        // 1000 m at 5 m chunks
        wait_for_len(&mut overlays, 200).await;
    }

    #[tokio::test]
    async fn test_worker_recomputes_after_sample_update() {
        let worker = OverlayWorker::spawn();
        let mut overlays = worker.overlays();

        let route = equatorial_route(100.0);
        let mid = LatLng::new(0.0, route[1].lng / 2.0);

        worker
            .submit(snapshot(route.clone(), Vec::new(), 16.0))
            .unwrap();
        let plain = wait_for_len(&mut overlays, 20).await;
        assert!(plain
            .iter()
            .all(|seg| seg.color == roughmap_core::Rgb::new(59, 130, 246)));

        worker
            .submit(snapshot(
                route,
                vec![RoughnessSample::new(mid, 0, 10.0)],
                16.0,
            ))
            .unwrap();

        let colored = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                overlays.changed().await.expect("worker exited early");
                let overlay = overlays.borrow_and_update().clone();
                if overlay
                    .iter()
                    .any(|seg| seg.color == roughmap_core::Rgb::new(255, 0, 0))
                {
                    return overlay;
                }
            }
        })
        .await
        .expect("rough sample never showed up in the overlay");

        assert_eq!(colored.len(), 20);
    }
}
