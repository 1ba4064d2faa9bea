//! Card catalog types.
//!
//! A [`Card`] is one entry in the game's card catalog (`data/cards.json`).
//! Stat fields are unsigned, so the "non-negative integer" catalog rule
//! holds by construction; validation only needs to reject empty or
//! duplicate entries (see `manarift-sessions`).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single card definition from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Card {
    /// Unique card identifier (e.g. `ember_bolt`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Mana cost to play this card.
    pub mana_cost: u32,
    /// Attack value.
    pub attack: u32,
    /// Health value.
    pub health: u32,
    /// Description / flavor text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The validated card catalog, keyed by card id.
pub type Catalog = BTreeMap<String, Card>;
