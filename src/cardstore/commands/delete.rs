use crate::error::Result;
use crate::keys::KeySpace;
use crate::store::KeyValueStore;

use super::helpers::require_card;

pub fn run<S: KeyValueStore + ?Sized>(store: &S, space: &KeySpace, id: &str) -> Result<bool> {
    require_card(store, space, id)?;
    store.remove(&space.record_key(id))?;
    Ok(true)
}
