//! promsim core: endpoint profiles, outage/latency/error simulation and the
//! load oscillation curve.
//!
//! This crate carries no transport or runtime dependencies. Everything here is
//! a pure function of elapsed time and an injected random source, so the
//! harness can drive it from HTTP handlers and tests can pin it down exactly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod oscillation;
pub mod profile;
pub mod sim;
pub mod target;

/// Shared result type.
pub use error::{PromsimError, Result};
