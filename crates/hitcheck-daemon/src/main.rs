//! Hitcheck Daemon - point-in-region checks over HTTP
//!
//! The daemon provides:
//! - `/`, `/check`, `/api/check` for hit checks (GET query or POST form)
//! - `/health` for liveness and ledger size
//! - Content negotiation between JSON and HTML responses

use clap::Parser;
use hitcheck_daemon::{DaemonConfig, DaemonError, DaemonResult, Server};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Hitcheck Daemon CLI
#[derive(Parser)]
#[command(name = "hitcheckd")]
#[command(about = "Hitcheck Daemon - point-in-region checks over HTTP", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "HITCHECK_CONFIG")]
    config: Option<String>,

    /// Listen address, overrides the configuration
    #[arg(short, long, env = "HITCHECK_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level, overrides the configuration
    #[arg(long, env = "HITCHECK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "HITCHECK_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())?;

    // Override with CLI args
    if let Some(listen) = cli.listen.as_deref() {
        config.server.listen_addr = listen
            .parse::<SocketAddr>()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.json = true;
    }

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.listen_addr,
        "Starting hitcheck daemon"
    );

    // Create and run server
    let server = Server::new(config)?;
    server.run().await
}
