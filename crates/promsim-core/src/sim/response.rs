//! Per-request response planning.

use std::f64::consts::PI;
use std::time::Duration;

use rand::Rng;

use crate::profile::EndpointProfile;
use crate::sim::outage::outage_factors;

/// Noise standard deviation is `base_latency / LATENCY_NOISE_DIVISOR`.
pub const LATENCY_NOISE_DIVISOR: f64 = 10.0;

/// What the handler should do for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponsePlan {
    /// Time to wait before answering. Never negative.
    pub latency: Duration,
    /// Answer with 500 instead of success.
    pub fail: bool,
    /// Whether the endpoint was inside an outage window.
    pub outage: bool,
}

/// One N(0, 1) sample (Box-Muller).
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // gen::<f64>() is [0, 1); flip it so ln() never sees 0.
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Seconds to wait; negative, NaN or infinite values mean no wait.
fn wait_from_secs(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::ZERO
    }
}

/// Plan a response for `profile`, `elapsed` after process start.
///
/// Latency is `(base + N(0, base/10)) * latency_factor`, clamped at zero.
/// The request fails when a uniform `[0, 1)` draw is `<= error_ratio * error_factor`.
pub fn plan_response<R: Rng + ?Sized>(
    profile: &EndpointProfile,
    elapsed: Duration,
    rng: &mut R,
) -> ResponsePlan {
    let factors = outage_factors(elapsed, profile.outage_duration);

    let base = profile.base_latency.as_secs_f64();
    let noisy = base + standard_normal(rng) * base / LATENCY_NOISE_DIVISOR;
    let latency = wait_from_secs(noisy * f64::from(factors.latency));

    let fail = rng.gen::<f64>() <= profile.error_ratio * factors.error;

    ResponsePlan {
        latency,
        fail,
        outage: factors.is_outage(),
    }
}
