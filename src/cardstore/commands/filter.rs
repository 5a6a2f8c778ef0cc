use crate::error::Result;
use crate::keys::KeySpace;
use crate::model::{Card, Status};
use crate::store::KeyValueStore;

use super::list;

/// Parses every code up front; one unknown code fails the whole request.
pub fn parse_status_codes<I: AsRef<str>>(codes: &[I]) -> Result<Vec<Status>> {
    codes.iter().map(|code| code.as_ref().parse()).collect()
}

/// Cards whose status is one of `statuses`. Cards without a status never match.
pub fn run<S: KeyValueStore + ?Sized>(
    store: &S,
    space: &KeySpace,
    statuses: &[Status],
) -> Result<Vec<Card>> {
    let cards = list::run(store, space)?;
    Ok(cards
        .into_iter()
        .filter(|card| card.status.is_some_and(|s| statuses.contains(&s)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CardError;
    use crate::store::memory::fixtures::StoreFixture;

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_card("a", "todo 1", Some(Status::Todo))
            .with_card("a", "todo 2", Some(Status::Todo))
            .with_card("a", "doing", Some(Status::InProgress))
            .with_card("a", "done", Some(Status::Done))
            .with_card("a", "no status", None)
            .with_card("b", "foreign todo", Some(Status::Todo))
    }

    fn names(mut cards: Vec<Card>) -> Vec<String> {
        cards.sort_by(|a, b| a.name.cmp(&b.name));
        cards.into_iter().map(|c| c.name).collect()
    }

    #[test]
    fn parses_known_codes() {
        let parsed = parse_status_codes(&["TODO", "DONE"]).unwrap();
        assert_eq!(parsed, vec![Status::Todo, Status::Done]);
    }

    #[test]
    fn unknown_code_fails() {
        let err = parse_status_codes(&["TODO", "LATER"]).unwrap_err();
        assert!(matches!(err, CardError::InvalidStatus(code) if code == "LATER"));
    }

    #[test]
    fn selects_exactly_the_todo_subset() {
        let fixture = fixture();
        let cards = run(fixture.store.as_ref(), &KeySpace::new("a"), &[Status::Todo]).unwrap();
        assert_eq!(names(cards), vec!["todo 1", "todo 2"]);
    }

    #[test]
    fn multiple_codes_union() {
        let fixture = fixture();
        let cards = run(
            fixture.store.as_ref(),
            &KeySpace::new("a"),
            &[Status::InProgress, Status::Done],
        )
        .unwrap();
        assert_eq!(names(cards), vec!["doing", "done"]);
    }

    #[test]
    fn no_codes_matches_nothing() {
        let fixture = fixture();
        let cards = run(fixture.store.as_ref(), &KeySpace::new("a"), &[]).unwrap();
        assert!(cards.is_empty());
    }
}
