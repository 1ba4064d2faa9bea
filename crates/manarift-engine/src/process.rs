//! Subprocess implementation of the engine bridge.
//!
//! Calls the rules engine (a Lua program) as a child process, one spawn
//! per call. The protocol is NDJSON request/response: one JSON line is
//! written to the child's stdin (which is then closed), and the first
//! complete line on its stdout is the authoritative response. Once a line
//! has been consumed the child is killed and any further output ignored.
//!
//! There is no pooling and no retry: each `run` is a single best-effort
//! attempt, and concurrent calls spawn fully independent children. There
//! is also no deadline -- a child that never writes a line and never exits
//! leaves the call pending. That matches the current service behavior and
//! is a known gap.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use manarift_types::{EngineCommand, EngineResult};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{ChildStderr, Command};

use crate::bridge::EngineBridge;
use crate::error::BridgeError;

/// Error code reported when the engine's output line is not valid JSON.
pub const CODE_PARSE_ERROR: &str = "ENGINE_PARSE_ERROR";

/// Error code reported when the engine exits before producing any output.
pub const CODE_ENGINE_EXIT: &str = "ENGINE_EXIT";

/// Options for [`ProcessEngineBridge`].
#[derive(Debug, Clone)]
pub struct ProcessBridgeOptions {
    /// Interpreter to run (e.g. `lua`, `lua5.4`).
    pub command: String,
    /// Extra arguments passed after the script path.
    pub args: Vec<String>,
    /// Working directory. Defaults to the script's package root (two
    /// levels above the script) so the engine can resolve its own modules.
    pub cwd: Option<PathBuf>,
}

impl Default for ProcessBridgeOptions {
    fn default() -> Self {
        Self {
            command: String::from("lua"),
            args: Vec::new(),
            cwd: None,
        }
    }
}

/// Spawns the rules engine as a subprocess, one process per call.
#[derive(Debug, Clone)]
pub struct ProcessEngineBridge {
    script_path: PathBuf,
    options: ProcessBridgeOptions,
}

impl ProcessEngineBridge {
    /// Create a bridge for the engine script at `script_path` with
    /// default options.
    pub fn new(script_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
            options: ProcessBridgeOptions::default(),
        }
    }

    /// Create a bridge with explicit options.
    pub fn with_options(script_path: impl Into<PathBuf>, options: ProcessBridgeOptions) -> Self {
        Self {
            script_path: script_path.into(),
            options,
        }
    }

    fn working_dir(&self) -> Option<PathBuf> {
        self.options.cwd.clone().or_else(|| {
            self.script_path
                .parent()
                .and_then(Path::parent)
                .filter(|dir| !dir.as_os_str().is_empty())
                .map(Path::to_path_buf)
        })
    }
}

#[async_trait]
impl EngineBridge for ProcessEngineBridge {
    async fn run(&self, command: &EngineCommand) -> Result<EngineResult, BridgeError> {
        let mut invocation = Command::new(&self.options.command);
        invocation
            .arg(&self.script_path)
            .args(&self.options.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = self.working_dir() {
            invocation.current_dir(dir);
        }

        let mut child = invocation.spawn().map_err(|source| BridgeError::Spawn {
            command: self.options.command.clone(),
            source,
        })?;

        // Engine diagnostics are forwarded for observability but are never
        // protocol data.
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_stderr(stderr));
        }

        let mut request = serde_json::to_string(command)?;
        request.push('\n');

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| BridgeError::Io(std::io::Error::other("child stdin not captured")))?;
        if let Err(err) = stdin.write_all(request.as_bytes()).await {
            // A child that dies before reading stdin breaks the pipe; its
            // exit status decides the outcome below.
            if err.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(BridgeError::Io(err));
            }
        }
        drop(stdin);

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| BridgeError::Io(std::io::Error::other("child stdout not captured")))?;
        let mut lines = BufReader::new(stdout).lines();

        match lines.next_line().await.map_err(BridgeError::Io)? {
            Some(line) => {
                // First line wins; the child may keep writing or exit
                // concurrently, neither changes the outcome.
                let _ = child.kill().await;
                match serde_json::from_str::<EngineResult>(&line) {
                    Ok(result) => Ok(result),
                    Err(parse_err) => {
                        tracing::warn!(
                            error = %parse_err,
                            raw_line = %line,
                            "Engine produced unparseable output"
                        );
                        Ok(EngineResult::Err {
                            error: String::from("Invalid JSON from engine"),
                            code: Some(String::from(CODE_PARSE_ERROR)),
                        })
                    }
                }
            }
            None => {
                // Stdout closed before any line arrived: the exit status is
                // the only signal left.
                let status = child.wait().await.map_err(BridgeError::Io)?;
                let error = match status.code() {
                    Some(0) => String::from("No output from engine"),
                    Some(code) => format!("Engine exited with code {code}"),
                    None => String::from("Engine terminated by signal"),
                };
                tracing::warn!(exit = ?status.code(), "Engine exited without output");
                Ok(EngineResult::Err {
                    error,
                    code: Some(String::from(CODE_ENGINE_EXIT)),
                })
            }
        }
    }
}

/// Forward the child's stderr line-by-line to the host's logs.
async fn forward_stderr(stderr: ChildStderr) {
    let mut lines = BufReader::new(stderr).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        tracing::warn!(%line, "Engine stderr");
    }
}
