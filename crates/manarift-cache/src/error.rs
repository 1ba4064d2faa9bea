//! Error types for the cache layer.
//!
//! All errors are propagated via [`CacheError`]. Backend failures are never
//! swallowed: silently losing a session write would break the persistence
//! contract, so connectivity and serialization problems surface to the
//! caller unmodified.

/// Errors that can occur in the cache layer.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A Redis operation failed.
    #[error("Redis error: {0}")]
    Backend(#[from] fred::error::Error),

    /// A serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration error (e.g. an invalid connection URL).
    #[error("Configuration error: {0}")]
    Config(String),
}
