//! Error types for the game API layer.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//!
//! Engine protocol errors never appear here: the create-session service
//! absorbs them into an empty session list, so the route still answers
//! with a success-shaped envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use manarift_sessions::SessionError;

/// Errors that can occur in the game API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request carried invalid input (e.g. a malformed user id).
    #[error("validation error: {0}")]
    Validation(String),

    /// A session operation failed (catalog, cache, or engine spawn).
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Session(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{e}")),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
