//! Card catalog loading and validation.
//!
//! The catalog lives in a JSON file (`data/cards.json`) as an array of
//! card definitions. Validation converts it to a map keyed by card id and
//! rejects empty catalogs, blank identity fields, and duplicate ids. A
//! malformed catalog is a hard error: no session is created from a deck
//! that cannot be checked against valid cards.

use std::path::{Path, PathBuf};

use manarift_types::{Card, Catalog};

/// Errors raised while loading or validating the card catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file does not exist.
    #[error("catalog file not found: {path}")]
    NotFound {
        /// The path that was checked.
        path: PathBuf,
    },

    /// The catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(std::io::Error),

    /// The catalog file is not a valid JSON array of cards.
    #[error("invalid JSON in catalog file: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog contains no cards.
    #[error("catalog must contain at least one card")]
    Empty,

    /// A card has a blank required field.
    #[error("catalog entry {index} has a blank {field}")]
    BlankField {
        /// Position of the offending card in the file.
        index: usize,
        /// Which field was blank (`id` or `name`).
        field: &'static str,
    },

    /// Two cards share the same id.
    #[error("catalog contains duplicate card id: {id}")]
    Duplicate {
        /// The duplicated card id.
        id: String,
    },
}

/// Validate a list of cards and convert it to a [`Catalog`] keyed by id.
///
/// For any non-empty input with unique, non-blank ids the resulting map
/// has exactly one entry per card.
///
/// # Errors
///
/// Returns [`CatalogError::Empty`], [`CatalogError::BlankField`], or
/// [`CatalogError::Duplicate`] when the corresponding rule is violated.
pub fn validate_catalog(cards: Vec<Card>) -> Result<Catalog, CatalogError> {
    if cards.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut catalog = Catalog::new();
    for (index, card) in cards.into_iter().enumerate() {
        if card.id.trim().is_empty() {
            return Err(CatalogError::BlankField { index, field: "id" });
        }
        if card.name.trim().is_empty() {
            return Err(CatalogError::BlankField { index, field: "name" });
        }
        let id = card.id.clone();
        if catalog.insert(id.clone(), card).is_some() {
            return Err(CatalogError::Duplicate { id });
        }
    }

    Ok(catalog)
}

/// Read and validate the card catalog from a JSON file.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if the file does not exist,
/// [`CatalogError::Json`] if it is not a valid card array, or any
/// validation error from [`validate_catalog`].
pub async fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = tokio::fs::read_to_string(path).await.map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            CatalogError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            CatalogError::Io(err)
        }
    })?;

    let cards: Vec<Card> = serde_json::from_str(&contents)?;
    let catalog = validate_catalog(cards)?;

    tracing::info!(card_count = catalog.len(), "Catalog validated");
    Ok(catalog)
}
