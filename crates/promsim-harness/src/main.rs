//! promsim: a simulated API and the load that drives it, in one process.
//!
//! - `/api/foo`, `/api/bar` : simulated endpoints with outages and errors
//! - `/metrics`             : request- and response-side counters/histograms
//! - JSON access log of every inbound request on stdout

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use promsim_core::error::{PromsimError, Result};
use promsim_core::oscillation::Oscillator;
use promsim_core::profile::ProfileTable;
use promsim_core::target::Target;
use promsim_harness::{
    app_state::AppState, client::LoadOscillator, config, obs::HarnessMetrics, router,
};

#[derive(Parser)]
#[command(name = "promsim")]
#[command(
    about = "Simulated API plus oscillating load, instrumented for dashboards",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// YAML config file
    #[arg(short, long, env = "PROMSIM_CONFIG")]
    config: Option<String>,

    /// The address to listen on for HTTP requests (`:8080` = all interfaces)
    #[arg(long = "listen-address", env = "PROMSIM_LISTEN")]
    listen: Option<String>,

    /// The duration of the rate oscillation period (e.g. `5m`)
    #[arg(long, env = "PROMSIM_OSCILLATION_PERIOD", value_parser = humantime::parse_duration)]
    oscillation_period: Option<Duration>,

    /// Fixed seed for the simulator's random source
    #[arg(long, env = "PROMSIM_SEED")]
    seed: Option<u64>,

    /// Serve only; do not start the built-in load loops
    #[arg(long)]
    no_client: bool,

    /// Human-readable logs instead of JSON
    #[arg(long, env = "PROMSIM_LOG_TEXT")]
    log_text: bool,
}

fn init_tracing(text: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    if text {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<config::HarnessConfig> {
    let mut cfg = match cli.config.as_deref() {
        Some(path) => config::load_from_file(path)?,
        None => config::HarnessConfig::default(),
    };

    // CLI overrides file
    if let Some(listen) = &cli.listen {
        cfg.server.listen = listen.clone();
    }
    if let Some(period) = cli.oscillation_period {
        cfg.client.set_oscillation_period(period);
    }
    if cli.seed.is_some() {
        cfg.simulator.seed = cli.seed;
    }
    if cli.no_client {
        cfg.client.enabled = false;
    }

    cfg.validate()?;
    Ok(cfg)
}

async fn run(cli: Cli) -> Result<()> {
    let cfg = load_config(&cli)?;
    let listen = cfg.server.bind_addr()?;

    let metrics = Arc::new(HarnessMetrics::new());
    let state = AppState::new(ProfileTable::builtin(), Arc::clone(&metrics), cfg.simulator.seed);
    let app = router::build_router(state.clone());

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| PromsimError::Internal(format!("bind {listen} failed: {e}")))?;
    let bound = listener
        .local_addr()
        .map_err(|e| PromsimError::Internal(format!("local_addr failed: {e}")))?;
    tracing::info!(%bound, "promsim starting");

    // Kept alive for the life of the process; dropping it stops the loops.
    let _load = if cfg.client.enabled {
        let oscillator = Oscillator::new(cfg.client.oscillation_period())?;
        let base_url = format!("http://{}", config::dial_addr(bound));
        Some(LoadOscillator::spawn(
            &base_url,
            oscillator,
            Target::builtin(),
            metrics,
            state.started(),
        )?)
    } else {
        None
    };

    axum::serve(listener, app)
        .await
        .map_err(|e| PromsimError::Internal(format!("server failed: {e}")))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_text);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(kind = e.kind().as_str(), error = %e, "promsim exited");
            ExitCode::FAILURE
        }
    }
}
