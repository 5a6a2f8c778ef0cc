//! # Cardstore Architecture
//!
//! Cardstore keeps task cards (`name`, optional `description`, optional workflow
//! `status`) in a plain key-value store. Many independent instances can share one
//! physical store; each writes under its own key prefix.
//!
//! Every record operation is `async` and waits a small, configurable latency
//! before touching the store, so code written against it keeps working if the
//! store is later replaced by a remote one.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs)                                     │
//! │  - Parses arguments, prints cards, owns the config file     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Instance + API (instance.rs, api.rs)                       │
//! │  - Connector hands out Database handles                     │
//! │  - Readiness check, latency, write serialization            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - Pure, synchronous business logic and validation          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - KeyValueStore trait: MemoryStore, FileStore              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use cardstore::instance::Connector;
//! use cardstore::model::{CardPatch, NewCard, Status};
//! use cardstore::store::memory::MemoryStore;
//! use std::sync::Arc;
//!
//! # async fn demo() -> cardstore::error::Result<()> {
//! let db = Connector::new(Arc::new(MemoryStore::new())).connect(None).await?;
//! let id = db.add_card(NewCard::new("Buy milk")).await?;
//! db.update_card_by_id(&id, CardPatch::status(Status::Done)).await?;
//! let done = db.get_cards_by_status_codes(&["DONE"]).await?;
//! assert_eq!(done.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`instance`]: `Connector`, sessions, namespace lifecycle
//! - [`api`]: the `Database` handle and its async record operations
//! - [`commands`]: business logic for each operation
//! - [`validation`]: what makes a card well-formed
//! - [`keys`]: record key layout and namespace membership
//! - [`store`]: key-value abstraction and implementations
//! - [`model`]: `Card`, `Status`, `NewCard`, `CardPatch`
//! - [`runtime`]: injectable id generator, clock and latency
//! - [`config`]: CLI configuration file
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod instance;
pub mod keys;
pub mod model;
pub mod runtime;
pub mod store;
pub mod validation;
