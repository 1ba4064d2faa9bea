//! Error types for the sessions layer.
//!
//! Note the taxonomy: catalog and cache failures abort the whole
//! operation, while engine *protocol* errors never reach this enum -- the
//! service absorbs them into an empty session list (see
//! [`service`](crate::service)). Only engine *spawn/I-O* failures
//! propagate as [`SessionError::Bridge`].

use manarift_cache::CacheError;
use manarift_engine::BridgeError;

use crate::catalog::CatalogError;

/// Errors that can occur while creating or persisting sessions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The card catalog could not be loaded or validated.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The engine process could not be driven (spawn or stream failure).
    #[error("engine bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// The session snapshot could not be persisted or read back.
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// A value could not be encoded for the engine.
    #[error("encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}
