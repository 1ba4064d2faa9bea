//! Game API server binary for Manarift.
//!
//! Wires configuration, the cache backend, the engine process bridge,
//! and the session service together, then serves HTTP.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `manarift.yaml` / environment
//! 3. Select the cache backend (Redis when configured, memory otherwise)
//! 4. Build the engine process bridge
//! 5. Build the create-session service and shared state
//! 6. Bind and serve

use std::path::PathBuf;
use std::sync::Arc;

use manarift_api::config::ApiConfig;
use manarift_api::state::AppState;
use manarift_api::start_server;
use manarift_cache::CacheBackend;
use manarift_engine::{ProcessBridgeOptions, ProcessEngineBridge};
use manarift_sessions::{CreateSessionService, SessionStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("manarift-api starting");

    // 2. Load configuration.
    let config = ApiConfig::load()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        engine_command = config.engine.command,
        catalog_path = config.catalog.path,
        redis_configured = config.infrastructure.redis_url.is_some(),
        "Configuration loaded"
    );

    // 3. Select the cache backend.
    let cache = CacheBackend::from_redis_url(config.infrastructure.redis_url.as_deref()).await?;

    // 4. Build the engine process bridge.
    let bridge = ProcessEngineBridge::with_options(
        &config.engine.script,
        ProcessBridgeOptions {
            command: config.engine.command.clone(),
            args: config.engine.args.clone(),
            cwd: config.engine.cwd.clone().map(PathBuf::from),
        },
    );

    // 5. Build the session service and shared state.
    let service =
        CreateSessionService::new(bridge, SessionStore::new(cache), config.catalog.path.clone());
    let state = Arc::new(AppState::new(service));

    // 6. Bind and serve.
    start_server(&config.server, state).await?;

    Ok(())
}
