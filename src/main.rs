mod api;
mod command;
mod config;
mod location;
mod poll;
#[cfg(test)]
mod testutil;

use api::{AgentApi, HttpAgentApi};
use clap::Parser;
use command::handlers::HandlerContext;
use config::AgentConfig;
use location::{LocationSource, SimulatedLocationSource};
use poll::{InvocationPoller, PollEvent};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Foxtrack device agent - registers remote commands and reports location
#[derive(Parser)]
#[command(name = "foxtrack-agent", version, about)]
struct Cli {
    /// Server base URL
    #[arg(long, env = "FOXTRACK_BASE_URL")]
    base_url: Option<String>,

    /// Stable device identifier used in server URLs
    #[arg(long, env = "FOXTRACK_DEVICE_ID")]
    device_id: Option<i64>,

    /// Path to TOML config file
    #[arg(short, long, env = "FOXTRACK_AGENT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    let mut config = AgentConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(device_id) = cli.device_id {
        config.device_id = device_id;
    }

    info!("Device agent starting: {}", config.device_id);
    info!("  server: {}", config.base_url);

    let api: Arc<dyn AgentApi> = Arc::new(HttpAgentApi::new(&config)?);
    let source: Arc<dyn LocationSource> =
        Arc::new(SimulatedLocationSource::new(config.simulation.clone()));

    let ctx = HandlerContext::new(config.device_id, api.clone(), source);

    // One registration attempt; the agent keeps running either way
    if let Err(e) = command::register_commands(api.as_ref(), config.device_id).await {
        warn!("Failed to register commands: {}", e);
    }

    let mut poller = InvocationPoller::start(config, api);

    // Main event loop
    loop {
        match poller.recv().await {
            Some(PollEvent::Received(invocation)) => {
                command::run_command(&invocation, &ctx).await;
            }
            Some(PollEvent::Failed { reason }) => {
                warn!("Invocation poll failed: {}", reason);
            }
            None => {
                error!("Invocation poller closed");
                break;
            }
        }
    }

    Ok(())
}
