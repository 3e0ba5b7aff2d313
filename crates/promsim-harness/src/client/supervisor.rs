//! Owns the per-target tasks and stops them on request.

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use promsim_core::error::{PromsimError, Result};
use promsim_core::oscillation::Oscillator;
use promsim_core::target::Target;

use crate::client::worker::LoadWorker;
use crate::obs::HarnessMetrics;

pub struct LoadOscillator {
    cancel: CancellationToken,
    tasks: JoinSet<()>,
}

impl LoadOscillator {
    /// Spawn one loop per target against `base_url` (e.g. `http://127.0.0.1:8080`).
    ///
    /// `process_start` anchors the oscillation phase.
    pub fn spawn(
        base_url: &str,
        oscillator: Oscillator,
        targets: Vec<Target>,
        metrics: Arc<HarnessMetrics>,
        process_start: Instant,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| PromsimError::Internal(format!("http client build failed: {e}")))?;

        let cancel = CancellationToken::new();
        let mut tasks = JoinSet::new();
        for target in targets {
            let worker = LoadWorker::new(client.clone(), base_url, target, Arc::clone(&metrics));
            tasks.spawn(worker.run(oscillator, process_start, cancel.child_token()));
        }

        tracing::info!(
            base_url,
            loops = tasks.len(),
            period = ?oscillator.period(),
            "load oscillator running"
        );
        Ok(Self { cancel, tasks })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Token that stops every loop when cancelled.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait until every loop has exited.
    pub async fn join(&mut self) {
        while let Some(res) = self.tasks.join_next().await {
            if let Err(e) = res {
                tracing::error!(error = %e, "load loop task failed");
            }
        }
    }

    /// Cancel all loops and wait for them.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        self.join().await;
    }
}

impl Drop for LoadOscillator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
