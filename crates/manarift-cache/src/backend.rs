//! Runtime-selected cache backend.
//!
//! The API binary picks its backend from configuration: a Redis URL when
//! one is set, the in-memory provider otherwise. Enum dispatch keeps the
//! provider trait free of object-safety constraints while still letting
//! one `AppState` type serve both deployments.

use async_trait::async_trait;

use crate::error::CacheError;
use crate::memory::MemoryCacheProvider;
use crate::provider::CacheProvider;
use crate::redis::RedisCacheProvider;

/// A cache backend chosen at startup.
#[allow(clippy::large_enum_variant)]
pub enum CacheBackend {
    /// Process-local map; state is lost on restart.
    Memory(MemoryCacheProvider),
    /// Durable external store.
    Redis(RedisCacheProvider),
}

impl CacheBackend {
    /// Build a backend from an optional Redis URL.
    ///
    /// Connects to Redis when `redis_url` is set; otherwise falls back to
    /// the in-memory provider.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the Redis connection fails.
    pub async fn from_redis_url(redis_url: Option<&str>) -> Result<Self, CacheError> {
        match redis_url {
            Some(url) => Ok(Self::Redis(RedisCacheProvider::connect(url).await?)),
            None => {
                tracing::info!("No Redis URL configured, using in-memory session cache");
                Ok(Self::Memory(MemoryCacheProvider::new()))
            }
        }
    }
}

#[async_trait]
impl CacheProvider for CacheBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self {
            Self::Memory(cache) => cache.get(key).await,
            Self::Redis(cache) => cache.get(key).await,
        }
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        match self {
            Self::Memory(cache) => cache.set(key, value, ttl_seconds).await,
            Self::Redis(cache) => cache.set(key, value, ttl_seconds).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        match self {
            Self::Memory(cache) => cache.delete(key).await,
            Self::Redis(cache) => cache.delete(key).await,
        }
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        match self {
            Self::Memory(cache) => cache.exists(key).await,
            Self::Redis(cache) => cache.exists(key).await,
        }
    }

    async fn clear(&self, pattern: Option<&str>) -> Result<(), CacheError> {
        match self {
            Self::Memory(cache) => cache.clear(pattern).await,
            Self::Redis(cache) => cache.clear(pattern).await,
        }
    }
}
