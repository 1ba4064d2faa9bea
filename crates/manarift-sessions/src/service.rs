//! The create-session flow.
//!
//! Composes the engine bridge, the session store, and the catalog/deck
//! collaborators: build an `init` command, drive one engine process,
//! persist the resulting snapshot, and hand back a descriptor.
//!
//! Engine-reported errors are deliberately absorbed into an *empty*
//! session list instead of failing the request -- the API stays
//! responsive even when the engine is broken, and the caller checks for
//! the empty result. Catalog, cache, and spawn failures abort the whole
//! operation.

use std::path::PathBuf;

use chrono::Utc;
use manarift_cache::CacheProvider;
use manarift_engine::EngineBridge;
use manarift_types::{
    CreateSessionInput, CreateSessionOutput, EngineCommand, EngineResult, InitPayload, Session,
    SessionDescriptor, SessionId,
};
use serde_json::Map;

use crate::catalog;
use crate::decks;
use crate::error::SessionError;
use crate::store::SessionStore;

/// Orchestrates session creation against the rules engine.
#[derive(Debug)]
pub struct CreateSessionService<B: EngineBridge, C: CacheProvider> {
    bridge: B,
    store: SessionStore<C>,
    catalog_path: PathBuf,
}

impl<B: EngineBridge, C: CacheProvider> CreateSessionService<B, C> {
    /// Create a service from its collaborators.
    pub fn new(bridge: B, store: SessionStore<C>, catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            bridge,
            store,
            catalog_path: catalog_path.into(),
        }
    }

    /// The session store this service persists into.
    pub const fn store(&self) -> &SessionStore<C> {
        &self.store
    }

    /// Create a new game session for `input.user_id`.
    ///
    /// Returns one descriptor on success, or an empty list when the
    /// engine reported an error (soft degradation -- nothing is
    /// persisted in that case).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the catalog is missing or invalid,
    /// the engine process cannot be driven at all, or the snapshot cannot
    /// be persisted.
    pub async fn execute(
        &self,
        input: CreateSessionInput,
    ) -> Result<CreateSessionOutput, SessionError> {
        // Catalog problems are hard validation errors: no engine process
        // is spawned for a deck that cannot be checked.
        let catalog = catalog::load_catalog(&self.catalog_path).await?;
        let deck_ids = decks::starter_deck_ids();
        let enemy_deck_ids = decks::opponent_deck_ids();

        let mut options = Map::new();
        options.insert(
            String::from("userId"),
            serde_json::to_value(input.user_id)?,
        );
        options.insert(String::from("catalog"), serde_json::to_value(&catalog)?);
        options.insert(String::from("deckIds"), serde_json::to_value(&deck_ids)?);
        options.insert(
            String::from("enemyDeckIds"),
            serde_json::to_value(&enemy_deck_ids)?,
        );

        let command = EngineCommand::Init {
            payload: Some(InitPayload {
                seed: None,
                options: Some(options),
            }),
        };

        tracing::debug!(user_id = %input.user_id, "Calling engine bridge");
        let result = self.bridge.run(&command).await?;

        let (state, events) = match result {
            EngineResult::Err { error, code } => {
                tracing::warn!(
                    error = %error,
                    code = ?code,
                    "Engine returned an error, responding with no sessions"
                );
                return Ok(CreateSessionOutput {
                    sessions: Vec::new(),
                });
            }
            EngineResult::Ok { state, events } => (state, events),
        };

        // The engine's id wins; generate one only when it stayed silent.
        let id = state
            .session_id
            .clone()
            .map_or_else(SessionId::generate, SessionId::from);

        let session = Session {
            id: id.clone(),
            state,
            events,
            user_id: input.user_id,
        };
        self.store.save(&session).await?;

        let now = Utc::now();
        let descriptor = SessionDescriptor {
            id,
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
        };

        tracing::info!(
            session_id = %descriptor.id,
            user_id = %descriptor.user_id,
            event_count = session.events.len(),
            "Session created and saved"
        );

        Ok(CreateSessionOutput {
            sessions: vec![descriptor],
        })
    }
}
