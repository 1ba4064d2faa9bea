//! Session DTOs shared between the API, the session store, and the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{SessionId, UserId};
use crate::protocol::{GameEvent, GameState};

/// A persisted session snapshot: the engine state plus the event log of
/// the command that produced it, owned by one user. This is what the
/// session store serializes into the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session identifier.
    pub id: SessionId,
    /// The full engine state at this snapshot.
    pub state: GameState,
    /// Events emitted by the command that produced this snapshot.
    pub events: Vec<GameEvent>,
    /// The user who owns this session.
    pub user_id: UserId,
}

/// The client-facing view of a session: identity and wall-clock
/// timestamps assigned by the orchestrator, independent of anything
/// inside the engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SessionDescriptor {
    /// Unique session identifier.
    pub id: SessionId,
    /// The user who owns this session.
    pub user_id: UserId,
    /// When the orchestrator created the session.
    pub created_at: DateTime<Utc>,
    /// When the orchestrator last updated the session.
    pub updated_at: DateTime<Utc>,
}

/// Input for the create-session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CreateSessionInput {
    /// The user requesting a new session.
    pub user_id: UserId,
}

/// Output of the create-session operation: zero sessions when the engine
/// soft-failed, one when a session was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct CreateSessionOutput {
    /// The created sessions.
    pub sessions: Vec<SessionDescriptor>,
}
