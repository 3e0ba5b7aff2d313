//! Load oscillation curve.
//!
//! `factor(t) = 2 + sin(sin(2*pi*t/period))` is continuous, periodic in
//! `period` and bounded by `[2 - sin 1, 2 + sin 1]`.

use std::f64::consts::PI;
use std::time::Duration;

use crate::error::{PromsimError, Result};

/// Center of the oscillation.
pub const OSCILLATION_CENTER: f64 = 2.0;

/// Smallest factor the curve ever returns.
pub fn min_factor() -> f64 {
    OSCILLATION_CENTER - 1f64.sin()
}

/// Largest factor the curve ever returns.
pub fn max_factor() -> f64 {
    OSCILLATION_CENTER + 1f64.sin()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    period: Duration,
}

impl Oscillator {
    pub fn new(period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(PromsimError::Config(
                "oscillation period must be non-zero".into(),
            ));
        }
        Ok(Self { period })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Multiplier for sleep intervals `elapsed` after process start.
    pub fn factor(&self, elapsed: Duration) -> f64 {
        // Reduce modulo the period first so huge uptimes keep their precision.
        let phase = (elapsed.as_nanos() % self.period.as_nanos()) as f64
            / self.period.as_nanos() as f64;
        OSCILLATION_CENTER + (2.0 * PI * phase).sin().sin()
    }

    /// `base * factor(elapsed)`.
    pub fn scaled(&self, base: Duration, elapsed: Duration) -> Duration {
        base.mul_f64(self.factor(elapsed))
    }
}
