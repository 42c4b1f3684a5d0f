//! Server setup and lifecycle management

use crate::api::{create_router, AppState};
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use axum::Router;
use hitcheck_core::{HistoryLedger, RequestPipeline};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Hitcheck daemon server
pub struct Server {
    config: DaemonConfig,
    ledger: Arc<HistoryLedger>,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        config.validate()?;

        // The ledger lives for the whole process and starts empty
        let ledger = Arc::new(HistoryLedger::with_capacity(config.ledger.capacity));

        Ok(Self { config, ledger })
    }

    /// Build the router served by this instance
    pub fn router(&self) -> Router {
        let pipeline = RequestPipeline::new(self.ledger.clone());
        create_router(AppState::new(pipeline), &self.config.server)
    }

    /// Run the server
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;
        let app = self.router();

        // Create listener
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("hitcheck daemon listening on {}", listener.local_addr()?);
        tracing::info!(capacity = self.ledger.capacity(), "History ledger ready");

        // Run server with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("hitcheck daemon shutting down");

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
