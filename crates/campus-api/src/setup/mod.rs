//! Application setup and initialization
//!
//! The composition root: configuration in, shared state and router out.

pub mod routes;
pub mod server;
pub mod storage;

use crate::clock::SystemClock;
use crate::constants::SERVICE_NAME;
use crate::state::AppState;
use anyhow::Result;
use campus_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    campus_infra::init_telemetry(
        SERVICE_NAME,
        config.environment(),
        config.server.log_format,
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let state = build_state(config).await?;
    let router = routes::setup_routes(&state.config, state.clone()).await?;

    Ok((state, router))
}

/// Build shared state without touching global process state (tracing).
pub async fn build_state(config: Config) -> Result<Arc<AppState>> {
    let storage = storage::setup_storage(&config).await?;
    Ok(Arc::new(AppState::new(config, storage, Arc::new(SystemClock))))
}
