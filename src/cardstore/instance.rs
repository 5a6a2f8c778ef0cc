//! # Instance Manager
//!
//! A [`Connector`] holds everything a database needs (the shared store, the id
//! generator, the clock and the simulated latency) and hands out connected
//! [`Database`] handles.
//!
//! ## Connecting
//!
//! - `connect(Some(id))` reuses an existing namespace. Nothing is wiped.
//! - `connect(None)` generates a fresh instance id **and clears the whole store**.
//!   The wipe is not namespaced: every other instance's records, and any unrelated
//!   keys sharing the store, are deleted too.
//!
//! A handle stays ready until [`Database::disconnect`] is called; after that every
//! record operation fails with [`CardError::NotReady`](crate::error::CardError).

use crate::api::Database;
use crate::error::{CardError, Result};
use crate::keys::{is_valid_segment, KeySpace};
use crate::runtime::{Clock, IdGenerator, Latency, SystemClock, UuidGenerator};
use crate::store::KeyValueStore;
use std::sync::Arc;
use tracing::{info, warn};

/// The namespace a connected database writes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    instance_id: String,
    keys: KeySpace,
}

impl Session {
    pub fn new(instance_id: impl Into<String>) -> Self {
        let instance_id = instance_id.into();
        let keys = KeySpace::new(&instance_id);
        Self { instance_id, keys }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn keys(&self) -> &KeySpace {
        &self.keys
    }
}

pub struct Connector<S: KeyValueStore> {
    store: Arc<S>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    latency: Latency,
}

impl<S: KeyValueStore> Clone for Connector<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            ids: Arc::clone(&self.ids),
            clock: Arc::clone(&self.clock),
            latency: self.latency,
        }
    }
}

impl<S: KeyValueStore> Connector<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            ids: Arc::new(UuidGenerator),
            clock: Arc::new(SystemClock),
            latency: Latency::default(),
        }
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Opens a database handle.
    ///
    /// With `previous_instance_id` the handle reattaches to that namespace and the
    /// store is left untouched. Without it a new instance id is generated and the
    /// **entire store is cleared**, including other instances' records.
    ///
    /// A previous id that is empty or contains the key delimiter is rejected with
    /// `InvalidInstanceId` and the store is not touched.
    pub async fn connect(&self, previous_instance_id: Option<&str>) -> Result<Database<S>> {
        let session = match previous_instance_id {
            Some(id) => {
                if !is_valid_segment(id) {
                    return Err(CardError::InvalidInstanceId(id.to_string()));
                }
                info!(instance_id = id, "reconnecting to existing instance");
                Session::new(id)
            }
            None => {
                let id = self.ids.new_id();
                if !is_valid_segment(&id) {
                    return Err(CardError::InvalidInstanceId(id));
                }
                warn!(instance_id = %id, "new instance: clearing the entire store");
                self.store.clear()?;
                Session::new(id)
            }
        };

        Ok(Database::new(
            Arc::clone(&self.store),
            Arc::clone(&self.ids),
            Arc::clone(&self.clock),
            self.latency,
            session,
        ))
    }
}
