//! JSON protocol for the external rules-engine process.
//!
//! The engine runs as a separate OS process. Commands are written to its
//! stdin and results read from its stdout, one JSON document per
//! newline-terminated line (NDJSON framing). The engine is the source of
//! truth for game state: known fields are typed here, everything else is
//! preserved verbatim in an open extension map.
//!
//! # Wire format
//!
//! Request: `{"type":"init","payload":{...}}` or
//! `{"type":"step","state":{...},"action":{"type":"...",...}}`.
//!
//! Response: `{"ok":true,"state":{...},"events":[...]}` or
//! `{"ok":false,"error":"...","code":"..."}`.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A command sent to the engine process. Exactly one variant per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EngineCommand {
    /// Start a new game. Carries optional seed and open options.
    Init {
        /// Initialization payload; omitted entirely when `None`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        payload: Option<InitPayload>,
    },
    /// Advance an existing game by one action.
    Step {
        /// The full game state the engine previously returned.
        state: GameState,
        /// The action to apply.
        action: GameAction,
    },
}

/// Payload for [`EngineCommand::Init`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitPayload {
    /// Optional seed for deterministic PvE games.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Open configuration map (deck ids, catalog, game mode, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

/// Full game state. The engine owns its shape; only the fields this
/// service reads are typed, the rest round-trips through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Session/match identifier, when the engine has assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Current turn number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<u64>,
    /// Current phase name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Per-player state blobs (life, resources, hand, board, ...).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<Value>,
    /// Any extra state the engine carries; preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An action applied to a game via [`EngineCommand::Step`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameAction {
    /// Action discriminator (play card, attack, end turn, ...).
    #[serde(rename = "type")]
    pub action_type: String,
    /// Action-specific fields; passed through to the engine verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An event emitted by the engine, consumed by the client for
/// animations and UI feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Event discriminator.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Optional event payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
}

/// The engine's response to one command. Exactly one variant is produced
/// per call.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineResult {
    /// The command succeeded; the new state and emitted events.
    Ok {
        /// The full game state after the command.
        state: GameState,
        /// Ordered events emitted while processing the command.
        events: Vec<GameEvent>,
    },
    /// The engine reported a domain or protocol error.
    Err {
        /// Human-readable error message.
        error: String,
        /// Machine-readable error code, when provided.
        code: Option<String>,
    },
}

impl EngineResult {
    /// Whether this result is the success variant.
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }

    /// Whether this result is the error variant.
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err { .. })
    }
}

/// Flat intermediate shape matching the wire exactly. Deserialized first,
/// then converted into the typed [`EngineResult`] so the `ok` discriminator
/// is checked against the fields that are actually present.
#[derive(Debug, Serialize, Deserialize)]
struct RawEngineResult {
    ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<GameState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    events: Option<Vec<GameEvent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl Serialize for EngineResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = match self {
            Self::Ok { state, events } => RawEngineResult {
                ok: true,
                state: Some(state.clone()),
                events: Some(events.clone()),
                error: None,
                code: None,
            },
            Self::Err { error, code } => RawEngineResult {
                ok: false,
                state: None,
                events: None,
                error: Some(error.clone()),
                code: code.clone(),
            },
        };
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EngineResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawEngineResult::deserialize(deserializer)?;
        if raw.ok {
            let state = raw
                .state
                .ok_or_else(|| D::Error::custom("engine result is ok but has no state"))?;
            Ok(Self::Ok {
                state,
                events: raw.events.unwrap_or_default(),
            })
        } else {
            let error = raw
                .error
                .ok_or_else(|| D::Error::custom("engine result is an error but has no message"))?;
            Ok(Self::Err {
                error,
                code: raw.code,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn init_command_wire_shape() {
        let command = EngineCommand::Init {
            payload: Some(InitPayload {
                seed: Some(7),
                options: None,
            }),
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json.get("type").and_then(Value::as_str), Some("init"));
        assert_eq!(
            json.get("payload").and_then(|p| p.get("seed")).and_then(Value::as_u64),
            Some(7)
        );
    }

    #[test]
    fn step_command_wire_shape() {
        let command = EngineCommand::Step {
            state: GameState {
                session_id: Some(String::from("abc")),
                ..GameState::default()
            },
            action: GameAction {
                action_type: String::from("end_turn"),
                extra: Map::new(),
            },
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json.get("type").and_then(Value::as_str), Some("step"));
        assert_eq!(
            json.get("action").and_then(|a| a.get("type")).and_then(Value::as_str),
            Some("end_turn")
        );
        assert_eq!(
            json.get("state").and_then(|s| s.get("sessionId")).and_then(Value::as_str),
            Some("abc")
        );
    }

    #[test]
    fn ok_result_roundtrip() {
        let raw = r#"{"ok":true,"state":{"sessionId":"abc","turn":1},"events":[{"type":"game_initialized"}]}"#;
        let result: EngineResult = serde_json::from_str(raw).unwrap();
        match &result {
            EngineResult::Ok { state, events } => {
                assert_eq!(state.session_id.as_deref(), Some("abc"));
                assert_eq!(state.turn, Some(1));
                assert_eq!(events.len(), 1);
            }
            EngineResult::Err { .. } => panic!("expected ok"),
        }
        let back = serde_json::to_value(&result).unwrap();
        assert_eq!(back.get("ok").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn err_result_roundtrip() {
        let raw = r#"{"ok":false,"error":"boom","code":"X"}"#;
        let result: EngineResult = serde_json::from_str(raw).unwrap();
        assert_eq!(
            result,
            EngineResult::Err {
                error: String::from("boom"),
                code: Some(String::from("X")),
            }
        );
        let back = serde_json::to_value(&result).unwrap();
        assert_eq!(back.get("ok").and_then(Value::as_bool), Some(false));
    }

    #[test]
    fn ok_without_state_is_a_parse_error() {
        let raw = r#"{"ok":true,"events":[]}"#;
        assert!(serde_json::from_str::<EngineResult>(raw).is_err());
    }

    #[test]
    fn err_without_message_is_a_parse_error() {
        let raw = r#"{"ok":false,"code":"X"}"#;
        assert!(serde_json::from_str::<EngineResult>(raw).is_err());
    }

    #[test]
    fn ok_without_events_defaults_to_empty() {
        let raw = r#"{"ok":true,"state":{}}"#;
        let result: EngineResult = serde_json::from_str(raw).unwrap();
        match result {
            EngineResult::Ok { events, .. } => assert!(events.is_empty()),
            EngineResult::Err { .. } => panic!("expected ok"),
        }
    }

    #[test]
    fn unknown_state_fields_round_trip_through_extra() {
        let raw = r#"{"sessionId":"abc","stack":[1,2],"activePlayer":0}"#;
        let state: GameState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.extra.get("activePlayer").and_then(Value::as_u64), Some(0));
        let back = serde_json::to_value(&state).unwrap();
        assert_eq!(back.get("stack").and_then(Value::as_array).map(Vec::len), Some(2));
    }
}
