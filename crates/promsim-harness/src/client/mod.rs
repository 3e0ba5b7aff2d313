//! Load oscillator: one request loop per target, paced by the oscillation curve.

pub mod supervisor;
pub mod worker;

pub use supervisor::LoadOscillator;
pub use worker::{Attempt, LoadWorker, TRANSPORT_ERROR_CODE};
