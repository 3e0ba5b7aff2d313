//! Harness config loader (strict parsing).

pub mod schema;

use std::fs;

use promsim_core::error::{PromsimError, Result};

pub use schema::{
    dial_addr, parse_listen, ClientSection, HarnessConfig, ServerSection, SimulatorSection,
};

pub fn load_from_file(path: &str) -> Result<HarnessConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PromsimError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<HarnessConfig> {
    let cfg: HarnessConfig = serde_yaml::from_str(s)
        .map_err(|e| PromsimError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
