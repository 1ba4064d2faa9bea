//! Game API server for Manarift.
//!
//! Exposes the HTTP surface over the session subsystem: a health route
//! and a create-session route that drives one rules-engine process per
//! request and persists the resulting snapshot. The SPA talks to this
//! server; the engine and the cache sit behind it.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with environment overrides
//! - [`auth`] -- mock authentication (fixed user id)
//! - [`state`] -- shared application state
//! - [`handlers`] -- REST endpoint handlers
//! - [`router`] -- route assembly with CORS and tracing
//! - [`server`] -- TCP bind and serve loop
//! - [`error`] -- error-to-response mapping

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
