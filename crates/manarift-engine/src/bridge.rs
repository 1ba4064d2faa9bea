//! The engine bridge abstraction.

use async_trait::async_trait;
use manarift_types::{EngineCommand, EngineResult};

use crate::error::BridgeError;

/// Bridge to the rules engine.
///
/// Implementations exchange exactly one command/result pair per call.
/// Whatever happens to the engine -- malformed output, early exit, a flood
/// of extra lines -- `run` produces exactly one [`EngineResult`]; only
/// infrastructure failures (spawn, I/O) surface as [`BridgeError`].
#[async_trait]
pub trait EngineBridge: Send + Sync {
    /// Send a command to the engine and return its result.
    async fn run(&self, command: &EngineCommand) -> Result<EngineResult, BridgeError>;
}
