//! In-memory cache backend.
//!
//! Holds entries in a constructor-owned map, so tests can instantiate
//! isolated instances concurrently. Expiry is checked lazily on every
//! `get`/`exists` call and the entry is evicted on access; no background
//! sweeper runs. Useful for development and testing without Redis.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::CacheError;
use crate::provider::CacheProvider;

/// One stored entry: the JSON value and its optional expiry instant.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// In-memory implementation of [`CacheProvider`].
///
/// Uses [`tokio::time::Instant`] for expiry so tests can drive the clock
/// with tokio's paused-time test utilities.
#[derive(Debug, Default)]
pub struct MemoryCacheProvider {
    store: Mutex<BTreeMap<String, CacheEntry>>,
}

impl MemoryCacheProvider {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, CacheEntry>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let mut store = self.lock();
        let expired = store.get(key).is_some_and(|entry| entry.is_expired(now));
        if expired {
            store.remove(key);
            return Ok(None);
        }
        Ok(store.get(key).map(|entry| entry.value.clone()))
    }

    async fn set(
        &self,
        key: &str,
        value: String,
        ttl_seconds: Option<u64>,
    ) -> Result<(), CacheError> {
        let expires_at =
            ttl_seconds.and_then(|secs| Instant::now().checked_add(Duration::from_secs(secs)));
        self.lock()
            .insert(String::from(key), CacheEntry { value, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        Ok(self.lock().remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let now = Instant::now();
        let mut store = self.lock();
        let expired = store.get(key).is_some_and(|entry| entry.is_expired(now));
        if expired {
            store.remove(key);
            return Ok(false);
        }
        Ok(store.contains_key(key))
    }

    async fn clear(&self, pattern: Option<&str>) -> Result<(), CacheError> {
        let mut store = self.lock();
        match pattern {
            Some(glob) => store.retain(|key, _| !glob_match(glob, key)),
            None => store.clear(),
        }
        Ok(())
    }
}

/// Match `text` against a glob `pattern` where `*` matches any run of
/// characters and `?` matches exactly one character.
///
/// Iterative with single-star backtracking; operates on chars so `?`
/// consumes one character even in multi-byte keys.
fn glob_match(pattern: &str, text: &str) -> bool {
    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = text.chars().collect();

    let mut pi = 0usize;
    let mut ti = 0usize;
    let mut star: Option<(usize, usize)> = None;

    while ti < txt.len() {
        match pat.get(pi) {
            Some('*') => {
                star = Some((pi, ti));
                pi = pi.saturating_add(1);
            }
            Some('?') => {
                pi = pi.saturating_add(1);
                ti = ti.saturating_add(1);
            }
            Some(c) if txt.get(ti) == Some(c) => {
                pi = pi.saturating_add(1);
                ti = ti.saturating_add(1);
            }
            _ => match star {
                // Backtrack: let the last `*` absorb one more character.
                Some((star_pi, star_ti)) => {
                    let resume = star_ti.saturating_add(1);
                    star = Some((star_pi, resume));
                    pi = star_pi.saturating_add(1);
                    ti = resume;
                }
                None => return false,
            },
        }
    }

    while pat.get(pi) == Some(&'*') {
        pi = pi.saturating_add(1);
    }
    pi == pat.len()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_returns_value() {
        let cache = MemoryCacheProvider::new();
        cache
            .set("k", String::from("\"v\""), None)
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(String::from("\"v\"")));
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let cache = MemoryCacheProvider::new();
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn get_after_ttl_elapses_returns_none() {
        let cache = MemoryCacheProvider::new();
        cache
            .set("k", String::from("\"v\""), Some(1))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(String::from("\"v\"")));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn exists_respects_ttl() {
        let cache = MemoryCacheProvider::new();
        cache
            .set("k", String::from("\"v\""), Some(5))
            .await
            .unwrap();
        assert!(cache.exists("k").await.unwrap());

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(!cache.exists("k").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn set_refreshes_ttl() {
        let cache = MemoryCacheProvider::new();
        cache
            .set("k", String::from("\"v1\""), Some(10))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(8)).await;

        // Re-save with the same TTL; the window restarts from now.
        cache
            .set("k", String::from("\"v2\""), Some(10))
            .await
            .unwrap();
        tokio::time::advance(Duration::from_secs(8)).await;
        assert_eq!(cache.get("k").await.unwrap(), Some(String::from("\"v2\"")));
    }

    #[tokio::test]
    async fn delete_returns_true_only_when_key_existed() {
        let cache = MemoryCacheProvider::new();
        cache.set("k", String::from("1"), None).await.unwrap();
        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
    }

    #[tokio::test]
    async fn clear_with_pattern_removes_only_matches() {
        let cache = MemoryCacheProvider::new();
        cache.set("session:a", String::from("1"), None).await.unwrap();
        cache.set("session:b", String::from("2"), None).await.unwrap();
        cache.set("deck:a", String::from("3"), None).await.unwrap();

        cache.clear(Some("session:*")).await.unwrap();

        assert!(!cache.exists("session:a").await.unwrap());
        assert!(!cache.exists("session:b").await.unwrap());
        assert!(cache.exists("deck:a").await.unwrap());
    }

    #[tokio::test]
    async fn clear_without_pattern_removes_everything() {
        let cache = MemoryCacheProvider::new();
        cache.set("a", String::from("1"), None).await.unwrap();
        cache.set("b", String::from("2"), None).await.unwrap();

        cache.clear(None).await.unwrap();

        assert!(!cache.exists("a").await.unwrap());
        assert!(!cache.exists("b").await.unwrap());
    }

    #[tokio::test]
    async fn typed_helpers_roundtrip() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Snapshot {
            name: String,
            turn: u64,
        }

        let cache = MemoryCacheProvider::new();
        let snapshot = Snapshot {
            name: String::from("alpha"),
            turn: 3,
        };
        cache.set_json("snap", &snapshot, None).await.unwrap();
        let restored: Option<Snapshot> = cache.get_json("snap").await.unwrap();
        assert_eq!(restored, Some(snapshot));
    }

    #[test]
    fn glob_star_matches_any_run() {
        assert!(glob_match("session:*", "session:abc"));
        assert!(glob_match("session:*", "session:"));
        assert!(!glob_match("session:*", "deck:abc"));
    }

    #[test]
    fn glob_question_mark_matches_single_character() {
        assert!(glob_match("session:?", "session:a"));
        assert!(!glob_match("session:?", "session:ab"));
        assert!(!glob_match("session:?", "session:"));
    }

    #[test]
    fn glob_literal_requires_exact_match() {
        assert!(glob_match("session:a", "session:a"));
        assert!(!glob_match("session:a", "session:ab"));
    }

    #[test]
    fn glob_star_backtracks() {
        assert!(glob_match("*:state", "agent:1:state"));
        assert!(glob_match("a*b*c", "axxbyyc"));
        assert!(!glob_match("a*b*c", "axxbyy"));
    }
}
