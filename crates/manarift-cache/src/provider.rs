//! The cache provider abstraction.
//!
//! Every backend stores JSON-serialized string values and exposes the same
//! capability set, so callers can swap implementations (Redis, in-memory)
//! without changing application code. TTLs are expressed in whole seconds;
//! a missing TTL means unbounded retention.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CacheError;

/// A TTL-aware key/value store holding JSON-serialized values.
///
/// `get` and `exists` treat expired entries as absent -- expiry is part of
/// the read contract, not a background process.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Get the raw JSON value at `key`, or `None` if missing or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store a raw JSON value at `key`, with an optional TTL in seconds.
    async fn set(
        &self,
        key: &str,
        value: String,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError>;

    /// Delete a key. Returns `true` iff a key was actually removed.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Whether `key` is present and unexpired.
    async fn exists(&self, key: &str) -> Result<bool, CacheError>;

    /// Remove entries matching a glob pattern (`*` = any run of characters,
    /// `?` = any single character), or everything when `pattern` is `None`.
    async fn clear(&self, pattern: Option<&str>) -> Result<(), CacheError>;

    /// Read the value at `key` and deserialize it from JSON.
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> Result<Option<T>, CacheError> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` as JSON and store it at `key`.
    async fn set_json<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        let json = serde_json::to_string(value)?;
        self.set(key, json, ttl_seconds).await
    }
}
