//! Error types for the engine bridge.
//!
//! Only infrastructure failures live here. Protocol-level problems
//! (unparseable output, premature exit) are *results*, not errors: they
//! come back as [`EngineResult::Err`](manarift_types::EngineResult) so the
//! orchestrator can degrade softly instead of failing the request.

/// Fatal bridge failures, propagated to the caller.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The engine process could not be spawned (missing executable,
    /// permission problem).
    #[error("failed to spawn engine process `{command}`: {source}")]
    Spawn {
        /// The command that was invoked.
        command: String,
        /// The underlying spawn error.
        source: std::io::Error,
    },

    /// The command could not be encoded as JSON.
    #[error("failed to encode engine command: {0}")]
    Encode(#[from] serde_json::Error),

    /// An I/O error on the child's standard streams.
    #[error("engine process I/O error: {0}")]
    Io(std::io::Error),
}
