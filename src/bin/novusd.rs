//! novusd — Novus gateway daemon.
//!
//! Serves the provider cascade and the trending feed over HTTP. Provider
//! credentials come from the environment; running with none is demo mode,
//! not an error.

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use novus_gateway::config::ProviderSettings;
use novus_gateway::gateway::GatewayBuilder;
use novus_gateway::server::config::Config;
use novus_gateway::server::{AppState, router};

/// Novus gateway daemon.
#[derive(Parser)]
#[command(name = "novusd")]
#[command(version)]
#[command(about = "Novus Exchange AI gateway daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let settings = ProviderSettings::from_env();
    if !settings.has_any_provider() {
        info!("no provider credentials found, running in demo mode");
    }
    let gateway = GatewayBuilder::from_settings(&settings)
        .timeout(config.server.provider_timeout_secs)
        .build();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        address = %config.server.address,
        providers = ?gateway.provider_names(),
        "novusd starting"
    );

    let state = Arc::new(AppState::new(gateway));
    let listener = tokio::net::TcpListener::bind(&config.server.address).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
