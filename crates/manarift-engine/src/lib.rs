//! Bridge to the external rules engine for the Manarift game API.
//!
//! The rules engine is a separate program driven over its standard
//! streams: one newline-terminated JSON command in, one JSON result line
//! out. This crate owns that protocol exchange and the process lifecycle
//! around it.
//!
//! # Modules
//!
//! - [`bridge`] -- the [`EngineBridge`] trait
//! - [`process`] -- subprocess implementation (one spawn per call)
//! - [`stub`] -- in-process stand-in for development and tests
//! - [`error`] -- fatal bridge failures

pub mod bridge;
pub mod error;
pub mod process;
pub mod stub;

// Re-export primary types for convenience.
pub use bridge::EngineBridge;
pub use error::BridgeError;
pub use process::{CODE_ENGINE_EXIT, CODE_PARSE_ERROR, ProcessBridgeOptions, ProcessEngineBridge};
pub use stub::StubEngineBridge;
