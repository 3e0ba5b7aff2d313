//! In-process metrics for both halves of the harness.
//!
//! Request-side (client loops) and response-side (simulated API) families are
//! kept apart and rendered together by the `/metrics` handler in Prometheus
//! text format.

pub mod metrics;

pub use metrics::{CounterVec, HarnessMetrics, HistogramVec, HttpMetrics};
