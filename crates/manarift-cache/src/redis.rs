//! Redis cache backend.
//!
//! Wraps a [`fred`] client. Storage, serialization, and TTL enforcement are
//! delegated to Redis itself: TTLs become `SET ... EX` expirations, so keys
//! vanish server-side without any lazy-expiry bookkeeping here. Native
//! errors are translated into [`CacheError`] and propagated, never
//! swallowed.

use async_trait::async_trait;
use fred::prelude::*;
use fred::types::scan::Scanner;
use futures::StreamExt;

use crate::error::CacheError;
use crate::provider::CacheProvider;

/// How many keys each SCAN page requests when clearing by pattern.
const SCAN_PAGE_SIZE: u32 = 100;

/// Redis implementation of [`CacheProvider`].
#[derive(Clone)]
pub struct RedisCacheProvider {
    client: Client,
}

impl RedisCacheProvider {
    /// Connect to Redis at the given URL.
    ///
    /// The URL follows the Redis scheme: `redis://host:port` or
    /// `redis://host:port/db`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Config`] if the URL cannot be parsed, or
    /// [`CacheError::Backend`] if the connection fails.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let config =
            Config::from_url(url).map_err(|e| CacheError::Config(format!("invalid Redis URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!("Connected to Redis session cache");
        Ok(Self { client })
    }

    /// Return a reference to the underlying [`Client`].
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let value: Option<String> = self.client.get(key).await?;
        Ok(value)
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        let expire = ttl_seconds.map(|secs| Expiration::EX(i64::try_from(secs).unwrap_or(i64::MAX)));
        let _: () = self.client.set(key, value.as_str(), expire, None, false).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let removed: u64 = self.client.del(key).await?;
        Ok(removed > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let found: u64 = self.client.exists(key).await?;
        Ok(found > 0)
    }

    async fn clear(&self, pattern: Option<&str>) -> Result<(), CacheError> {
        match pattern {
            Some(glob) => {
                // KEYS is not exposed by fred's typed interface; SCAN pages
                // are the supported path and avoid blocking the server.
                let mut scanner = self.client.scan(glob, Some(SCAN_PAGE_SIZE), None);
                while let Some(result) = scanner.next().await {
                    let mut page = result?;
                    if let Some(keys) = page.take_results()
                        && !keys.is_empty()
                    {
                        let _: u64 = self.client.del(keys).await?;
                    }
                    page.next();
                }
            }
            None => {
                let _: () = self.client.flushall(false).await?;
            }
        }
        Ok(())
    }
}
