//! REST API endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness check |
//! | `POST` | `/sessions` | Create a game session for the current user |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use chrono::Utc;
use manarift_cache::CacheProvider;
use manarift_engine::EngineBridge;
use manarift_types::CreateSessionInput;

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;

/// Liveness check: always `200` with a timestamp.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}

/// Create a game session for the requesting user.
///
/// Responds `200` with an array of session descriptors. The array is
/// empty when the engine reported an error -- that is the documented
/// soft-degradation path, not a failure of this route.
pub async fn create_session<B: EngineBridge, C: CacheProvider>(
    State(state): State<Arc<AppState<B, C>>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = auth::user_id_from_headers(&headers)?;
    let output = state
        .service
        .execute(CreateSessionInput { user_id })
        .await?;
    Ok(Json(output.sessions))
}
