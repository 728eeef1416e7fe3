use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use realty_api::{app, AppConfig, AppState};

/// Listing and booking API for the realty site
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Bind address, overrides HOST
    #[arg(long)]
    host: Option<String>,

    /// Listening port, overrides PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SUPABASE_URL and the keys
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("realty_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env().context("failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    tracing::info!("Starting realty-api in {:?} mode", config.environment);

    let bind_addr = config.bind_addr();
    let state = AppState::supabase(config).context("failed to build remote store client")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Server is running on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
