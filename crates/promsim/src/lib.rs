//! Top-level facade crate for promsim.
//!
//! Re-exports the simulation core and the harness library so users can depend on a single crate.

pub mod core {
    pub use promsim_core::*;
}

pub mod harness {
    pub use promsim_harness::*;
}
