pub mod api; // REST router, endpoints and server lifecycle
pub mod config;
pub mod core_state; // Shared roster + provider behind the API
pub mod dashboard; // Daily overview
pub mod error;
pub mod models;
pub mod provider; // DataProvider seam + sample data
pub mod reports; // Adherence report aggregation
pub mod roster; // Patient search and registration

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::api::ServerError;
use crate::config::{AppConfig, ConfigError};
use crate::core_state::CoreState;
use crate::provider::SampleDataProvider;

/// Failures that stop the service before or while it runs.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Install the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Load configuration, serve the API, and stop cleanly on Ctrl-C.
pub async fn run() -> Result<(), RunError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        adherence_source = config.adherence_source.as_str(),
        contact_validation = config.contact_validation.as_str(),
        tier_excellent = config.tiers.excellent,
        tier_good = config.tiers.good,
        "Configuration loaded"
    );

    let bind_addr = config.bind_addr;
    let core = Arc::new(CoreState::new(Arc::new(SampleDataProvider::new()), config));
    let mut server = api::start_api_server(core, bind_addr).await?;

    let signal = tokio::signal::ctrl_c().await;
    server.shutdown();
    server.stopped().await;

    signal.map_err(RunError::Signal)
}
