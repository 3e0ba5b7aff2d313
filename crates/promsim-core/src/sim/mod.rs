//! Response simulation: outage cycling plus randomized latency and errors.
//!
//! All functions take the elapsed time since process start and an injected
//! `rand::Rng`, never the wall clock directly.

pub mod outage;
pub mod response;

pub use outage::{outage_factors, OutageFactors, OUTAGE_CYCLE_MULTIPLIER};
pub use response::{plan_response, standard_normal, ResponsePlan};
