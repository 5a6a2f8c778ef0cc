use crate::error::{CardError, Result};
use crate::keys::{is_valid_segment, KeySpace};
use crate::model::Card;
use crate::store::KeyValueStore;

/// Reads and parses the card stored under `key`, if any.
pub fn load_card<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Result<Option<Card>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Like [`load_card`], but a missing card is `NotFound`.
///
/// An id that could not have been generated (empty, or containing the key
/// delimiter) is `NotFound` without reading the store.
pub fn require_card<S: KeyValueStore + ?Sized>(
    store: &S,
    space: &KeySpace,
    id: &str,
) -> Result<Card> {
    if !is_valid_segment(id) {
        return Err(CardError::NotFound(id.to_string()));
    }
    load_card(store, &space.record_key(id))?.ok_or_else(|| CardError::NotFound(id.to_string()))
}

pub fn save_card<S: KeyValueStore + ?Sized>(store: &S, space: &KeySpace, card: &Card) -> Result<()> {
    let raw = serde_json::to_string(card)?;
    store.set(&space.record_key(&card.id), &raw)
}
