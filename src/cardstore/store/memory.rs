use super::KeyValueStore;
use crate::error::{CardError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory key-value store for testing and embedding.
/// Does NOT persist data.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    simulate_write_error: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    /// Affects `set`, `remove` and `clear`; reads keep working.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(CardError::Store("Simulated write error".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.entries.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.check_writable()?;
        self.entries.write().clear();
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::keys::KeySpace;
    use crate::model::{Card, NewCard, Status};
    use std::sync::Arc;

    /// Builds a `MemoryStore` pre-populated with cards written the same way the
    /// record engine writes them.
    pub struct StoreFixture {
        pub store: Arc<MemoryStore>,
        next_id: usize,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: Arc::new(MemoryStore::new()),
                next_id: 0,
            }
        }

        pub fn with_card(mut self, instance_id: &str, name: &str, status: Option<Status>) -> Self {
            self.next_id += 1;
            let mut input = NewCard::new(name);
            input.status = status;
            let card = Card::new(format!("fixture-{}", self.next_id), input, 1_000);
            let key = KeySpace::new(instance_id).record_key(&card.id);
            let raw = serde_json::to_string(&card).unwrap();
            self.store.set(&key, &raw).unwrap();
            self
        }

        pub fn with_cards(mut self, instance_id: &str, count: usize) -> Self {
            for i in 0..count {
                self = self.with_card(instance_id, &format!("Card {}", i + 1), None);
            }
            self
        }

        /// Writes a raw, non-card entry, as another application sharing the
        /// store would.
        pub fn with_raw(self, key: &str, value: &str) -> Self {
            self.store.set(key, value).unwrap();
            self
        }
    }
}
