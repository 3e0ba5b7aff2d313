//! Shared application state for the promsim harness.
//!
//! Everything the handlers touch is constructed once in `AppState::new` and
//! shared by reference; nothing lives in process globals.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::Instant;

use promsim_core::profile::{EndpointProfile, ProfileTable};
use promsim_core::sim::{plan_response, ResponsePlan};

use crate::obs::HarnessMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<HarnessMetrics>,
}

struct AppStateInner {
    profiles: ProfileTable,
    rng: Mutex<StdRng>,
    started: Instant,
}

impl AppState {
    /// Build application state. `seed` pins the simulator's random source.
    pub fn new(profiles: ProfileTable, metrics: Arc<HarnessMetrics>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_start(profiles, metrics, rng, Instant::now())
    }

    /// Build state with an explicit random source and process start instant.
    pub fn with_start(
        profiles: ProfileTable,
        metrics: Arc<HarnessMetrics>,
        rng: StdRng,
        started: Instant,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                profiles,
                rng: Mutex::new(rng),
                started,
            }),
            metrics,
        }
    }

    pub fn profiles(&self) -> &ProfileTable {
        &self.inner.profiles
    }

    pub fn metrics(&self) -> Arc<HarnessMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Process start; shared with the load oscillator's phase.
    pub fn started(&self) -> Instant {
        self.inner.started
    }

    /// Process uptime; outage windows are keyed off this.
    pub fn uptime(&self) -> Duration {
        self.inner.started.elapsed()
    }

    /// Plan one simulated response at the current uptime.
    pub fn plan(&self, profile: &EndpointProfile) -> ResponsePlan {
        let elapsed = self.uptime();
        let mut rng = self
            .inner
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        plan_response(profile, elapsed, &mut *rng)
    }
}
