//! Type-safe identifier wrappers.
//!
//! User identifiers are UUID v4 newtypes so the compiler prevents mixing
//! them with other strings. Session identifiers wrap a plain [`String`]
//! instead: the rules engine is authoritative over session-id shape and may
//! mint any string it likes, so forcing a UUID here would reject valid
//! engine output. [`SessionId::generate`] exists for the fallback case where
//! the engine omits an id.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new random identifier (UUID v4).
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_uuid_id! {
    /// Unique identifier for a user (session owner).
    UserId
}

/// Unique identifier for a game session.
///
/// Stored as an opaque string because the id normally originates from the
/// engine's `sessionId` state field. When the engine does not provide one,
/// [`SessionId::generate`] mints a fresh UUID v4 string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a fresh random session id (UUID v4 string).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Return the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(String::from(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn user_ids_are_unique() {
        assert_ne!(UserId::new(), UserId::new());
    }

    #[test]
    fn generated_session_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn session_id_serializes_as_plain_string() {
        let id = SessionId::from("abc");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc\"");
    }

    #[test]
    fn user_id_roundtrip_serde() {
        let original = UserId::new();
        let json = serde_json::to_string(&original).unwrap();
        let restored: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }
}
