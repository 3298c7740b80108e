pub mod analysis; // Prompt building + request handler core
pub mod api; // axum router, CORS, error mapping, server lifecycle
pub mod client; // Caller side of the analysis endpoint
pub mod config;
pub mod gateway; // Outbound chat-completion transport + forced schema
pub mod models;
pub mod views; // Upload / query / results / session view state

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::analysis::CaseAnalyzer;
use crate::api::{start_api_server, ServerError};
use crate::config::{AppConfig, ConfigError};
use crate::gateway::{GatewayError, HttpGateway};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot create gateway client: {0}")]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Initialize tracing from `RUST_LOG`, falling back to the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Serve the analysis API until Ctrl-C.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    tracing::debug!(gateway = ?config.gateway, "Gateway configuration");

    if !config.gateway.has_credential() {
        tracing::warn!("AI_GATEWAY_API_KEY is not set; every analysis request will fail");
    }

    let gateway = HttpGateway::from_config(&config.gateway)?;
    let analyzer = Arc::new(CaseAnalyzer::new(gateway, config.gateway.clone()));
    let mut server = start_api_server(analyzer, config.bind_addr).await?;
    tracing::info!(url = %server.base_url(), "Analysis API ready");

    tokio::signal::ctrl_c().await.map_err(StartupError::Signal)?;

    server.shutdown();
    server.stopped().await;
    Ok(())
}
