//! Headless host running the demo world.

use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use viscid::ViscidServer;
use viscid_core::config::LiquidConfig;

const DEFAULT_CONFIG_PATH: &str = "viscid_config.json5";

fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;
    // Library crates log through `log`
    tracing_log::LogTracer::init().context("failed to bridge log records")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = LiquidConfig::load_or_create(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let mut server = ViscidServer::demo(config)?;

    let cancel_token = server.cancel_token.clone();
    tokio::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl-C: {error}");
        }
        log::info!("Shutting down");
        cancel_token.cancel();
    });

    server.run().await;
    Ok(())
}
