//! Shared application state for the game API.

use manarift_cache::CacheProvider;
use manarift_engine::EngineBridge;
use manarift_sessions::CreateSessionService;

/// State shared by all request handlers.
///
/// Generic over the bridge and cache so deployments use the process
/// bridge with Redis while tests inject the stub bridge and the
/// in-memory cache.
pub struct AppState<B: EngineBridge, C: CacheProvider> {
    /// The create-session orchestrator.
    pub service: CreateSessionService<B, C>,
}

impl<B: EngineBridge, C: CacheProvider> AppState<B, C> {
    /// Create state around a configured service.
    pub const fn new(service: CreateSessionService<B, C>) -> Self {
        Self { service }
    }
}
