//! API Server
//!
//! Listener setup, middleware stack and graceful shutdown.

use super::{
    handlers::AppState,
    middleware::{create_cors_layer, preflight_middleware, request_id_middleware},
    routes::create_router,
};
use crate::{config::ServerConfig, coordinator::TransactionCoordinator, errors::FairDiceResult};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Assemble the router with the full middleware stack
pub fn build_app(config: &ServerConfig, coordinator: Arc<TransactionCoordinator>) -> axum::Router {
    let state = Arc::new(AppState { coordinator });

    create_router(state)
        // Request ID middleware (first for tracing)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(create_cors_layer(config.allowed_origins.clone()))
        // Outside CORS so preflight responses keep their headers
        .layer(axum::middleware::from_fn(preflight_middleware))
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        // Tracing layer (last for complete request tracing)
        .layer(TraceLayer::new_for_http())
}

/// Install the global tracing subscriber; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fairdice=info,tower_http=info".into()),
        )
        .try_init();
}

pub struct ApiServer {
    config: ServerConfig,
    coordinator: Arc<TransactionCoordinator>,
}

impl ApiServer {
    pub fn new(config: ServerConfig, coordinator: Arc<TransactionCoordinator>) -> Self {
        Self {
            config,
            coordinator,
        }
    }

    /// Serve until Ctrl+C or SIGTERM
    pub async fn run(self) -> FairDiceResult<()> {
        init_tracing();

        let addr = self.socket_addr()?;
        let app = build_app(&self.config, self.coordinator.clone());

        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Server running at http://{}", addr);
        self.log_server_info();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped gracefully");
        Ok(())
    }

    fn socket_addr(&self) -> FairDiceResult<SocketAddr> {
        let ip = self.config.host.parse::<std::net::IpAddr>().map_err(|_| {
            crate::errors::ConfigurationError::InvalidValue {
                field: "server.host".to_string(),
                value: self.config.host.clone(),
                reason: "Expected an IP address".to_string(),
            }
        })?;
        Ok(SocketAddr::from((ip, self.config.port)))
    }

    fn log_server_info(&self) {
        let seeds = self.coordinator.seeds();
        info!("   CORS: {:?}", self.config.allowed_origins);
        info!("   Request timeout: {}s", self.config.request_timeout_secs);
        info!("   Client seed: {}", seeds.client_seed);
        info!("Available endpoints:");
        info!("   POST /roll-dice     - Place a bet");
        info!("   GET  /balance       - Current balance");
        info!("   GET  /game-history  - All settled bets");
        info!("   POST /reset-game    - Restore the starting balance");
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received terminate signal");
        },
    }
}
