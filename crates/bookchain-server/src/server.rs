use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use bookchain_ledger::LedgerReader;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Bookchain HTTP server.
pub struct BookchainServer {
    config: ServerConfig,
    state: AppState,
}

impl BookchainServer {
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        let router = build_router(self.state.clone());
        if self.config.request_trace {
            router.layer(TraceLayer::new_for_http())
        } else {
            router
        }
    }

    /// Log every block currently on the chain.
    pub fn log_chain(&self) -> ServerResult<()> {
        for block in self.state.ledger.snapshot()? {
            info!(
                position = block.position,
                previous_hash = %block.previous_hash,
                hash = %block.hash,
                genesis = block.is_genesis(),
                "chain block"
            );
        }
        Ok(())
    }

    /// Serve requests until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        self.log_chain()?;
        let app = self.router();
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        info!("Bookchain server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(config: ServerConfig) -> BookchainServer {
        BookchainServer::new(config, AppState::new().unwrap())
    }

    #[test]
    fn server_construction() {
        let s = server(ServerConfig::default());
        assert_eq!(s.config().bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(s.state().ledger.block_count().unwrap(), 1);
    }

    #[test]
    fn router_builds_with_and_without_tracing() {
        let _traced = server(ServerConfig::default()).router();
        let _plain = server(ServerConfig {
            request_trace: false,
            ..ServerConfig::default()
        })
        .router();
    }

    #[test]
    fn log_chain_walks_snapshot() {
        server(ServerConfig::default()).log_chain().unwrap();
    }
}
