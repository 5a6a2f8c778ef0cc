use crate::error::{CardError, Result};
use crate::keys::KeySpace;
use crate::model::CardPatch;
use crate::store::KeyValueStore;
use crate::validation::validate;

use super::helpers::{require_card, save_card};

/// Lays `patch` over the stored card and writes it back.
///
/// `id` and `created` are never changed. The merged card is validated before the
/// write; an invalid merge leaves the stored card as it was.
pub fn run<S: KeyValueStore + ?Sized>(
    store: &S,
    space: &KeySpace,
    id: &str,
    patch: &CardPatch,
    now: i64,
) -> Result<bool> {
    let existing = require_card(store, space, id)?;
    let merged = existing.merged(patch, now);
    validate(&merged).map_err(CardError::InvalidCard)?;
    save_card(store, space, &merged)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{add, get};
    use crate::model::{NewCard, Status};
    use crate::store::memory::MemoryStore;
    use crate::validation::Violation;

    fn setup() -> (MemoryStore, KeySpace) {
        let store = MemoryStore::new();
        let space = KeySpace::new("inst");
        add::run(&store, &space, "c1".into(), NewCard::new("Buy milk"), 100).unwrap();
        (store, space)
    }

    #[test]
    fn updates_status_and_bumps_last_updated() {
        let (store, space) = setup();

        assert!(run(&store, &space, "c1", &CardPatch::status(Status::Done), 200).unwrap());

        let card = get::run(&store, &space, "c1").unwrap();
        assert_eq!(card.status, Some(Status::Done));
        assert_eq!(card.name, "Buy milk");
        assert_eq!(card.created, 100);
        assert_eq!(card.last_updated, 200);
    }

    #[test]
    fn missing_card_is_not_found() {
        let (store, space) = setup();
        let err = run(&store, &space, "nope", &CardPatch::name("x"), 200).unwrap_err();
        assert!(matches!(err, CardError::NotFound(_)));
    }

    #[test]
    fn invalid_merge_is_not_persisted() {
        let (store, space) = setup();
        let before = get::run(&store, &space, "c1").unwrap();

        let err = run(&store, &space, "c1", &CardPatch::name(""), 200).unwrap_err();
        assert!(matches!(err, CardError::InvalidCard(Violation::EmptyName)));

        let after = get::run(&store, &space, "c1").unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn empty_description_patch_is_rejected() {
        let (store, space) = setup();
        let err = run(&store, &space, "c1", &CardPatch::description(""), 200).unwrap_err();
        assert!(matches!(
            err,
            CardError::InvalidCard(Violation::EmptyDescription)
        ));
        assert_eq!(get::run(&store, &space, "c1").unwrap().description, None);
    }

    #[test]
    fn empty_patch_only_touches_last_updated() {
        let (store, space) = setup();
        run(&store, &space, "c1", &CardPatch::default(), 150).unwrap();

        let card = get::run(&store, &space, "c1").unwrap();
        assert_eq!(card.name, "Buy milk");
        assert_eq!(card.last_updated, 150);
    }

    #[test]
    fn failed_write_leaves_card_unchanged() {
        let (store, space) = setup();
        store.set_simulate_write_error(true);

        let err = run(&store, &space, "c1", &CardPatch::name("New"), 200).unwrap_err();
        assert!(matches!(err, CardError::Store(_)));
        assert_eq!(get::run(&store, &space, "c1").unwrap().name, "Buy milk");
    }
}
