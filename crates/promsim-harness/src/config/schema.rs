use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::Deserialize;
use promsim_core::error::{PromsimError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub client: ClientSection,

    #[serde(default)]
    pub simulator: SimulatorSection,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            client: ClientSection::default(),
            simulator: SimulatorSection::default(),
        }
    }
}

impl HarnessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PromsimError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.client.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// `host:port`, or `:port` for all interfaces.
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        parse_listen(&self.listen)?;
        Ok(())
    }

    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        parse_listen(&self.listen)
    }
}

/// 24h.
const MAX_OSCILLATION_PERIOD_MS: u64 = 86_400_000;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    #[serde(default = "default_oscillation_period_ms")]
    pub oscillation_period_ms: u64,

    /// Run the built-in load loops against our own listener.
    #[serde(default = "default_client_enabled")]
    pub enabled: bool,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            oscillation_period_ms: default_oscillation_period_ms(),
            enabled: default_client_enabled(),
        }
    }
}

impl ClientSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_OSCILLATION_PERIOD_MS).contains(&self.oscillation_period_ms) {
            return Err(PromsimError::Config(format!(
                "client.oscillation_period_ms must be between 1 and {MAX_OSCILLATION_PERIOD_MS}"
            )));
        }
        Ok(())
    }

    pub fn oscillation_period(&self) -> Duration {
        Duration::from_millis(self.oscillation_period_ms)
    }

    /// Millisecond resolution; anything finer is dropped.
    pub fn set_oscillation_period(&mut self, period: Duration) {
        self.oscillation_period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SimulatorSection {
    /// Fixed RNG seed. Entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_listen() -> String {
    ":8080".into()
}
fn default_oscillation_period_ms() -> u64 {
    300_000
}
fn default_client_enabled() -> bool {
    true
}

/// Parse `host:port` or `:port` (all interfaces).
pub fn parse_listen(s: &str) -> Result<SocketAddr> {
    let bad = |e: String| PromsimError::Config(format!("invalid listen address {s:?}: {e}"));
    if let Some(port) = s.strip_prefix(':') {
        let port: u16 = port.parse().map_err(|e| bad(format!("{e}")))?;
        return Ok(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port));
    }
    s.parse().map_err(|e| bad(format!("{e}")))
}

/// Address the local client should dial to reach `bound`.
///
/// Wildcard binds are reached over loopback.
pub fn dial_addr(bound: SocketAddr) -> SocketAddr {
    let ip = match bound.ip() {
        IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
        IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(std::net::Ipv6Addr::LOCALHOST),
        ip => ip,
    };
    SocketAddr::new(ip, bound.port())
}
