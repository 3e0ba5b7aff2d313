//! A single target's request loop.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use promsim_core::oscillation::Oscillator;
use promsim_core::target::{Method, Target};

use crate::obs::HarnessMetrics;

/// `code` label recorded when no HTTP response was received.
pub const TRANSPORT_ERROR_CODE: &str = "";

/// Outcome of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Status(u16),
    TransportError,
}

pub struct LoadWorker {
    client: reqwest::Client,
    url: String,
    target: Target,
    metrics: Arc<HarnessMetrics>,
}

impl LoadWorker {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        target: Target,
        metrics: Arc<HarnessMetrics>,
    ) -> Self {
        let url = format!("{}{}", base_url.trim_end_matches('/'), target.path);
        Self {
            client,
            url,
            target,
            metrics,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Issue one request and record it on the request-side metrics.
    ///
    /// Exactly one counter increment and one histogram observation per call.
    pub async fn attempt(&self) -> Attempt {
        let started = Instant::now();

        let req = match self.target.method {
            Method::Get => self.client.get(&self.url),
            Method::Post => self
                .client
                .post(&self.url)
                .header(CONTENT_TYPE, "text/plain")
                .body(""),
        };

        let outcome = match req.send().await {
            Ok(resp) => {
                let status = resp.status();
                // Drain so the connection can be reused.
                let _ = resp.bytes().await;
                Attempt::Status(status.as_u16())
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.target, error = %e, "request failed");
                Attempt::TransportError
            }
        };

        let code = match outcome {
            Attempt::Status(s) => s.to_string(),
            Attempt::TransportError => TRANSPORT_ERROR_CODE.to_string(),
        };
        self.metrics.requests.record(
            self.target.method.as_str(),
            &self.target.path,
            &code,
            started.elapsed(),
        );
        outcome
    }

    /// Request, pause `base_interval * factor(uptime)`, repeat until cancelled.
    pub async fn run(
        self,
        oscillator: Oscillator,
        process_start: Instant,
        cancel: CancellationToken,
    ) {
        tracing::info!(endpoint = %self.target, "load loop started");
        loop {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                a = self.attempt() => a,
            };
            tracing::trace!(endpoint = %self.target, ?outcome, "attempt done");

            let pause = oscillator.scaled(self.target.base_interval, process_start.elapsed());
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(pause) => {}
            }
        }
        tracing::info!(endpoint = %self.target, "load loop stopped");
    }
}
