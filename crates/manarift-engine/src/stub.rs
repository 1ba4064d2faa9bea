//! Stub engine bridge for development and tests.
//!
//! Returns a minimal valid result without spawning any process, so the
//! session API works before the engine package is available. Tests can
//! also pin a canned result and inspect the commands the orchestrator
//! sent.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use manarift_types::{EngineCommand, EngineResult, GameEvent, GameState, SessionId};
use serde_json::Map;

use crate::bridge::EngineBridge;
use crate::error::BridgeError;

/// In-process stand-in for the engine.
#[derive(Debug, Default)]
pub struct StubEngineBridge {
    canned: Option<EngineResult>,
    commands: Mutex<Vec<EngineCommand>>,
}

impl StubEngineBridge {
    /// Create a stub with the default behavior: a fresh playable state for
    /// `Init`, an echo of the incoming state for `Step`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stub that answers every command with `result`.
    pub fn with_result(result: EngineResult) -> Self {
        Self {
            canned: Some(result),
            commands: Mutex::new(Vec::new()),
        }
    }

    /// The commands received so far, in call order.
    pub fn commands(&self) -> Vec<EngineCommand> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl EngineBridge for StubEngineBridge {
    async fn run(&self, command: &EngineCommand) -> Result<EngineResult, BridgeError> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command.clone());

        if let Some(result) = &self.canned {
            return Ok(result.clone());
        }

        match command {
            EngineCommand::Init { .. } => Ok(EngineResult::Ok {
                state: GameState {
                    session_id: Some(SessionId::generate().0),
                    turn: Some(1),
                    phase: Some(String::from("play")),
                    players: Vec::new(),
                    extra: Map::new(),
                },
                events: vec![GameEvent {
                    event_type: String::from("game_initialized"),
                    payload: Some(Map::new()),
                }],
            }),
            EngineCommand::Step { state, action } => {
                let mut payload = Map::new();
                payload.insert(String::from("action"), serde_json::to_value(action)?);
                Ok(EngineResult::Ok {
                    state: state.clone(),
                    events: vec![GameEvent {
                        event_type: String::from("step_processed"),
                        payload: Some(payload),
                    }],
                })
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use manarift_types::{GameAction, InitPayload};

    use super::*;

    #[tokio::test]
    async fn init_returns_a_fresh_session() {
        let stub = StubEngineBridge::new();
        let result = stub
            .run(&EngineCommand::Init {
                payload: Some(InitPayload::default()),
            })
            .await
            .unwrap();
        match result {
            EngineResult::Ok { state, events } => {
                assert!(state.session_id.is_some());
                assert_eq!(state.turn, Some(1));
                assert_eq!(events.first().map(|e| e.event_type.as_str()), Some("game_initialized"));
            }
            EngineResult::Err { .. } => panic!("expected ok result"),
        }
    }

    #[tokio::test]
    async fn step_echoes_the_incoming_state() {
        let stub = StubEngineBridge::new();
        let state = GameState {
            session_id: Some(String::from("abc")),
            turn: Some(4),
            ..GameState::default()
        };
        let result = stub
            .run(&EngineCommand::Step {
                state: state.clone(),
                action: GameAction {
                    action_type: String::from("end_turn"),
                    extra: Map::new(),
                },
            })
            .await
            .unwrap();
        match result {
            EngineResult::Ok { state: echoed, events } => {
                assert_eq!(echoed, state);
                assert_eq!(events.first().map(|e| e.event_type.as_str()), Some("step_processed"));
            }
            EngineResult::Err { .. } => panic!("expected ok result"),
        }
    }

    #[tokio::test]
    async fn canned_result_overrides_default_behavior() {
        let stub = StubEngineBridge::with_result(EngineResult::Err {
            error: String::from("boom"),
            code: Some(String::from("X")),
        });
        let result = stub
            .run(&EngineCommand::Init { payload: None })
            .await
            .unwrap();
        assert!(result.is_err());
        assert_eq!(stub.commands().len(), 1);
    }
}
