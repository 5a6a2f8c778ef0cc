use crate::error::{CardError, Result};
use crate::keys::{is_valid_segment, KeySpace};
use crate::model::{Card, NewCard};
use crate::store::KeyValueStore;
use crate::validation::validate;

use super::helpers::save_card;

/// Creates a card with the given `id` and returns that id.
pub fn run<S: KeyValueStore + ?Sized>(
    store: &S,
    space: &KeySpace,
    id: String,
    input: NewCard,
    now: i64,
) -> Result<String> {
    if !is_valid_segment(&id) {
        return Err(CardError::Store(format!("Generated card id is not usable as a key: {:?}", id)));
    }
    let card = Card::new(id, input, now);
    validate(&card).map_err(CardError::InvalidCard)?;
    save_card(store, space, &card)?;
    Ok(card.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{get, list};
    use crate::model::Status;
    use crate::store::memory::MemoryStore;
    use crate::validation::Violation;

    #[test]
    fn creates_card_with_both_timestamps_equal() {
        let store = MemoryStore::new();
        let space = KeySpace::new("inst");
        let input = NewCard::new("Buy milk").with_status(Status::Todo);

        let id = run(&store, &space, "c1".into(), input, 500).unwrap();
        assert_eq!(id, "c1");

        let card = get::run(&store, &space, &id).unwrap();
        assert_eq!(card.name, "Buy milk");
        assert_eq!(card.status, Some(Status::Todo));
        assert_eq!(card.description, None);
        assert_eq!(card.created, 500);
        assert_eq!(card.last_updated, 500);
    }

    #[test]
    fn writes_under_namespaced_key() {
        let store = MemoryStore::new();
        let space = KeySpace::new("inst");
        run(&store, &space, "c1".into(), NewCard::new("A"), 1).unwrap();

        assert!(store.get("card:inst:c1").unwrap().is_some());
    }

    #[test]
    fn rejects_empty_name_without_writing() {
        let store = MemoryStore::new();
        let space = KeySpace::new("inst");

        let err = run(&store, &space, "c1".into(), NewCard::new(""), 1).unwrap_err();
        assert!(matches!(err, CardError::InvalidCard(Violation::EmptyName)));
        assert!(store.is_empty());
        assert!(list::run(&store, &space).unwrap().is_empty());
    }

    #[test]
    fn rejects_empty_description_without_writing() {
        let store = MemoryStore::new();
        let space = KeySpace::new("inst");
        let input = NewCard::new("Name").with_description("");

        let err = run(&store, &space, "c1".into(), input, 1).unwrap_err();
        assert!(matches!(
            err,
            CardError::InvalidCard(Violation::EmptyDescription)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn rejects_generated_id_containing_delimiter() {
        let store = MemoryStore::new();
        let space = KeySpace::new("inst");

        let err = run(&store, &space, "x:y".into(), NewCard::new("A"), 1).unwrap_err();
        assert!(matches!(err, CardError::Store(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn surfaces_store_write_errors() {
        let store = MemoryStore::new();
        store.set_simulate_write_error(true);
        let space = KeySpace::new("inst");

        let err = run(&store, &space, "c1".into(), NewCard::new("A"), 1).unwrap_err();
        assert!(matches!(err, CardError::Store(_)));
    }
}
