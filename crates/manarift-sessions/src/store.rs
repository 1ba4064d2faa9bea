//! Session persistence on top of the cache provider.
//!
//! Sessions are stored under `session:<id>` keys as JSON snapshots with a
//! fixed 24-hour retention TTL. Every save re-applies the TTL, so the
//! window restarts from the most recent write. There is no extra locking:
//! consistency is whatever the backend provides, and concurrent saves of
//! the same id settle on last-write-wins.

use manarift_cache::{CacheError, CacheProvider};
use manarift_types::{Session, SessionId};

/// Retention TTL applied on every save: 24 hours.
pub const SESSION_TTL_SECONDS: u64 = 86_400;

/// TTL-bound store for [`Session`] snapshots.
#[derive(Debug)]
pub struct SessionStore<C: CacheProvider> {
    cache: C,
}

impl<C: CacheProvider> SessionStore<C> {
    /// Create a store backed by the given cache provider.
    pub const fn new(cache: C) -> Self {
        Self { cache }
    }

    fn key(id: &SessionId) -> String {
        format!("session:{id}")
    }

    /// Persist a session snapshot, (re)applying the retention TTL.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if serialization or the backend write fails.
    pub async fn save(&self, session: &Session) -> Result<(), CacheError> {
        tracing::debug!(session_id = %session.id, "Saving session snapshot");
        self.cache
            .set_json(&Self::key(&session.id), session, Some(SESSION_TTL_SECONDS))
            .await
    }

    /// Look up a session by id. Returns `None` when absent or expired.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend read or deserialization fails.
    pub async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, CacheError> {
        tracing::debug!(session_id = %id, "Loading session snapshot");
        self.cache.get_json(&Self::key(id)).await
    }

    /// Delete a session. Returns `true` iff a session was removed.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend delete fails.
    pub async fn delete(&self, id: &SessionId) -> Result<bool, CacheError> {
        tracing::debug!(session_id = %id, "Deleting session snapshot");
        self.cache.delete(&Self::key(id)).await
    }

    /// Whether a session exists and is unexpired.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] if the backend check fails.
    pub async fn exists(&self, id: &SessionId) -> Result<bool, CacheError> {
        self.cache.exists(&Self::key(id)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use manarift_cache::MemoryCacheProvider;
    use manarift_types::{GameState, UserId};

    use super::*;

    fn session(id: &str) -> Session {
        Session {
            id: SessionId::from(id),
            state: GameState {
                session_id: Some(String::from(id)),
                turn: Some(1),
                ..GameState::default()
            },
            events: Vec::new(),
            user_id: UserId::new(),
        }
    }

    #[tokio::test]
    async fn save_then_find_returns_equal_session() {
        let store = SessionStore::new(MemoryCacheProvider::new());
        let original = session("abc");

        store.save(&original).await.unwrap();
        let restored = store.find_by_id(&original.id).await.unwrap();
        assert_eq!(restored, Some(original));
    }

    #[tokio::test]
    async fn find_missing_session_returns_none() {
        let store = SessionStore::new(MemoryCacheProvider::new());
        let found = store.find_by_id(&SessionId::from("ghost")).await.unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test(start_paused = true)]
    async fn session_expires_after_retention_window() {
        let store = SessionStore::new(MemoryCacheProvider::new());
        let snapshot = session("abc");
        store.save(&snapshot).await.unwrap();

        tokio::time::advance(std::time::Duration::from_secs(SESSION_TTL_SECONDS.saturating_add(1)))
            .await;
        assert_eq!(store.find_by_id(&snapshot.id).await.unwrap(), None);
        assert!(!store.exists(&snapshot.id).await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn save_refreshes_the_retention_window() {
        let store = SessionStore::new(MemoryCacheProvider::new());
        let snapshot = session("abc");
        store.save(&snapshot).await.unwrap();

        // Just before expiry, save again; the TTL restarts.
        tokio::time::advance(std::time::Duration::from_secs(SESSION_TTL_SECONDS.saturating_sub(10)))
            .await;
        store.save(&snapshot).await.unwrap();
        tokio::time::advance(std::time::Duration::from_secs(SESSION_TTL_SECONDS.saturating_sub(10)))
            .await;

        assert!(store.exists(&snapshot.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_absent_session_returns_false() {
        let store = SessionStore::new(MemoryCacheProvider::new());
        assert!(!store.delete(&SessionId::from("ghost")).await.unwrap());
    }

    #[tokio::test]
    async fn keys_are_namespaced_per_session() {
        let store = SessionStore::new(MemoryCacheProvider::new());
        let first = session("one");
        let second = session("two");
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        assert!(store.delete(&first.id).await.unwrap());
        assert!(store.exists(&second.id).await.unwrap());
    }
}
