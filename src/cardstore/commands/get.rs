use crate::error::Result;
use crate::keys::KeySpace;
use crate::model::Card;
use crate::store::KeyValueStore;

use super::helpers::require_card;

pub fn run<S: KeyValueStore + ?Sized>(store: &S, space: &KeySpace, id: &str) -> Result<Card> {
    require_card(store, space, id)
}
