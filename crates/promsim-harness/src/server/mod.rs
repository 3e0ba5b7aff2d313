//! Response simulator: the HTTP face of the simulated API.

pub mod simulate;

pub use simulate::{api_subtree, simulate, API_PREFIX};
