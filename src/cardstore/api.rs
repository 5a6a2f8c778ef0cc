//! # API Facade
//!
//! [`Database`] is the handle returned by
//! [`Connector::connect`](crate::instance::Connector::connect) and the single entry
//! point for record operations. It is a **thin facade** over the command layer:
//!
//! 1. check the handle is connected (`NotReady` otherwise),
//! 2. wait the simulated latency,
//! 3. dispatch to `commands::<op>::run` with the namespace, a fresh id and the
//!    current time.
//!
//! Business rules live in `commands/*.rs` and are tested there; the tests here
//! cover the async contract: readiness, latency, and interleaving of concurrent
//! calls.
//!
//! ## One Failure Channel
//!
//! Every operation is an `async fn` returning [`Result`]. A disconnected handle
//! reports `NotReady` through that same `Result`, without waiting the latency.
//!
//! ## Concurrent Mutations
//!
//! Mutations on one handle are serialized: after the latency pause each takes the
//! handle's write lock, and the read-merge-write of an update happens under it
//! with no await point in between. Two overlapping updates of the same card are
//! applied one after the other, so neither is lost. Handles are not coordinated
//! with each other.

use crate::commands;
use crate::error::{CardError, Result};
use crate::instance::Session;
use crate::model::{Card, CardPatch, NewCard};
use crate::runtime::{Clock, IdGenerator, Latency};
use crate::store::KeyValueStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub struct Database<S: KeyValueStore> {
    store: Arc<S>,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    latency: Latency,
    session: Option<Session>,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> Database<S> {
    pub(crate) fn new(
        store: Arc<S>,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        latency: Latency,
        session: Session,
    ) -> Self {
        Self {
            store,
            ids,
            clock,
            latency,
            session: Some(session),
            write_lock: Mutex::new(()),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    /// The connected instance id, `None` once disconnected.
    pub fn instance_id(&self) -> Option<&str> {
        self.session.as_ref().map(Session::instance_id)
    }

    /// Drops the session. Calling it again is a no-op.
    pub fn disconnect(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            info!(instance_id = session.instance_id(), "disconnected");
        }
        Ok(())
    }

    fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(CardError::NotReady)
    }

    pub async fn add_card(&self, input: NewCard) -> Result<String> {
        let session = self.session()?;
        self.latency.pause().await;

        let _guard = self.write_lock.lock().await;
        let id = commands::add::run(
            self.store.as_ref(),
            session.keys(),
            self.ids.new_id(),
            input,
            self.clock.now_millis(),
        )?;
        debug!(card_id = %id, "card added");
        Ok(id)
    }

    pub async fn get_card_by_id(&self, id: &str) -> Result<Card> {
        let session = self.session()?;
        self.latency.pause().await;

        commands::get::run(self.store.as_ref(), session.keys(), id)
    }

    pub async fn update_card_by_id(&self, id: &str, patch: CardPatch) -> Result<bool> {
        let session = self.session()?;
        self.latency.pause().await;

        let _guard = self.write_lock.lock().await;
        let updated = commands::update::run(
            self.store.as_ref(),
            session.keys(),
            id,
            &patch,
            self.clock.now_millis(),
        )?;
        debug!(card_id = id, "card updated");
        Ok(updated)
    }

    pub async fn delete_card_by_id(&self, id: &str) -> Result<bool> {
        let session = self.session()?;
        self.latency.pause().await;

        let _guard = self.write_lock.lock().await;
        let deleted = commands::delete::run(self.store.as_ref(), session.keys(), id)?;
        debug!(card_id = id, "card deleted");
        Ok(deleted)
    }

    /// All cards in this instance. The order is unspecified.
    pub async fn get_cards(&self) -> Result<Vec<Card>> {
        let session = self.session()?;
        self.latency.pause().await;

        commands::list::run(self.store.as_ref(), session.keys())
    }

    /// Cards whose status is one of `codes` (`TODO`, `IN_PROGRESS`, `DONE`).
    ///
    /// Every code is checked before the store is read; an unknown one fails the
    /// whole call with `InvalidStatus`. The order is unspecified.
    pub async fn get_cards_by_status_codes<I: AsRef<str>>(&self, codes: &[I]) -> Result<Vec<Card>> {
        let session = self.session()?;
        let statuses = commands::filter::parse_status_codes(codes)?;
        self.latency.pause().await;

        commands::filter::run(self.store.as_ref(), session.keys(), &statuses)
    }
}
