use crate::error::Result;
use crate::keys::KeySpace;
use crate::model::Card;
use crate::store::KeyValueStore;

use super::helpers::load_card;

/// Every card in the namespace, in the store's key enumeration order (unordered).
///
/// Scans the full key space of the store and keeps keys under this namespace's
/// prefix. An empty namespace yields an empty list.
pub fn run<S: KeyValueStore + ?Sized>(store: &S, space: &KeySpace) -> Result<Vec<Card>> {
    let keys = store.keys()?;
    let mut cards = Vec::new();
    for key in space.select(&keys) {
        // A key can vanish between enumeration and read; skip it.
        if let Some(card) = load_card(store, key)? {
            cards.push(card);
        }
    }
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::MemoryStore;

    #[test]
    fn empty_namespace_is_empty_list() {
        let store = MemoryStore::new();
        assert!(run(&store, &KeySpace::new("inst")).unwrap().is_empty());
    }

    #[test]
    fn lists_only_own_namespace() {
        let fixture = StoreFixture::new()
            .with_cards("a", 3)
            .with_cards("b", 2)
            .with_raw("settings", "{}");

        assert_eq!(run(fixture.store.as_ref(), &KeySpace::new("a")).unwrap().len(), 3);
        assert_eq!(run(fixture.store.as_ref(), &KeySpace::new("b")).unwrap().len(), 2);
    }

    #[test]
    fn ignores_keys_that_merely_contain_the_prefix() {
        // Not valid card JSON: reading it would fail, so it must not be selected.
        let fixture = StoreFixture::new()
            .with_cards("a", 1)
            .with_raw("card:b:card:a:1", "garbage");

        let cards = run(fixture.store.as_ref(), &KeySpace::new("a")).unwrap();
        assert_eq!(cards.len(), 1);
    }
}
