//! Outage cycle.
//!
//! Every `OUTAGE_CYCLE_MULTIPLIER * outage_duration` of process uptime an
//! outage opens and lasts `outage_duration`. The cycle starts inside a window,
//! so the effects are visible right after startup.

use std::time::Duration;

/// A cycle is this many outage durations long.
pub const OUTAGE_CYCLE_MULTIPLIER: u32 = 10;
/// Latency multiplier while an outage is active.
pub const OUTAGE_LATENCY_FACTOR: u32 = 3;
/// Error ratio multiplier while an outage is active.
pub const OUTAGE_ERROR_FACTOR: f64 = 10.0;

/// Multipliers applied to a profile's base latency and error ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutageFactors {
    pub latency: u32,
    pub error: f64,
}

impl OutageFactors {
    pub const NOMINAL: Self = Self {
        latency: 1,
        error: 1.0,
    };
    pub const OUTAGE: Self = Self {
        latency: OUTAGE_LATENCY_FACTOR,
        error: OUTAGE_ERROR_FACTOR,
    };

    pub fn is_outage(&self) -> bool {
        self.latency != 1
    }
}

/// Factors in effect `elapsed` after process start.
///
/// A zero `outage_duration` never produces an outage.
pub fn outage_factors(elapsed: Duration, outage_duration: Duration) -> OutageFactors {
    let window = outage_duration.as_nanos();
    if window == 0 {
        return OutageFactors::NOMINAL;
    }
    let cycle = window * u128::from(OUTAGE_CYCLE_MULTIPLIER);
    if elapsed.as_nanos() % cycle < window {
        OutageFactors::OUTAGE
    } else {
        OutageFactors::NOMINAL
    }
}
