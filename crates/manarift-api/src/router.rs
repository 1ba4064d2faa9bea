//! Axum router construction for the game API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for the SPA and request tracing for observability.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use manarift_cache::CacheProvider;
use manarift_engine::EngineBridge;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the game API.
///
/// The router includes:
/// - `GET /health` -- liveness check
/// - `POST /sessions` -- create a game session
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router<B, C>(state: Arc<AppState<B, C>>) -> Router
where
    B: EngineBridge + 'static,
    C: CacheProvider + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/sessions", post(handlers::create_session::<B, C>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
