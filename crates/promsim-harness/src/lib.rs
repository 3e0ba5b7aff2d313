//! promsim harness library entry.
//!
//! Wires the response simulator, the load oscillator, and the metrics
//! registry into one process. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod client;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod server;
