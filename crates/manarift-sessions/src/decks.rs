//! Mock deck providers.
//!
//! Deck building is not implemented yet: every player gets the same fixed
//! starter deck, and PvE opponents get its mirror. Once decks are
//! persisted per user these become repository lookups keyed by user id
//! and difficulty.

/// Card ids in the fixed starter deck: two distinct cards, three copies
/// each.
pub fn starter_deck_ids() -> Vec<String> {
    vec![
        String::from("ember_bolt"),
        String::from("aegis_ward"),
        String::from("ember_bolt"),
        String::from("aegis_ward"),
        String::from("ember_bolt"),
        String::from("aegis_ward"),
    ]
}

/// Card ids in the fixed PvE opponent deck. Same cards as the starter
/// deck in mirrored order; a difficulty system would vary these.
pub fn opponent_deck_ids() -> Vec<String> {
    vec![
        String::from("aegis_ward"),
        String::from("ember_bolt"),
        String::from("aegis_ward"),
        String::from("ember_bolt"),
        String::from("aegis_ward"),
        String::from("ember_bolt"),
    ]
}
