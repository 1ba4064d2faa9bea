//! Shared type definitions for the Manarift game API.
//!
//! This crate is the single source of truth for types used across the
//! Manarift workspace. Client-facing DTOs flow downstream to `TypeScript`
//! via `ts-rs` for the SPA.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers
//! - [`cards`] -- Card catalog types
//! - [`protocol`] -- JSON protocol for the external rules-engine process
//! - [`sessions`] -- Session DTOs (snapshot, descriptor, operation I/O)

pub mod cards;
pub mod ids;
pub mod protocol;
pub mod sessions;

// Re-export all public types at crate root for convenience.
pub use cards::{Card, Catalog};
pub use ids::{SessionId, UserId};
pub use protocol::{EngineCommand, EngineResult, GameAction, GameEvent, GameState, InitPayload};
pub use sessions::{CreateSessionInput, CreateSessionOutput, Session, SessionDescriptor};
