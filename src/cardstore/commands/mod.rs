//! # Command Layer
//!
//! Business logic for each record operation, one module per operation. Commands
//! are synchronous and side-effect free apart from the store they are handed:
//! the caller supplies the namespace, the new id and the current time, which keeps
//! every command testable against a [`MemoryStore`](crate::store::memory::MemoryStore)
//! without a runtime.
//!
//! Every command validates before it writes. A command that returns `Err` has not
//! modified the store.

pub mod add;
pub mod delete;
pub mod filter;
pub mod get;
pub mod helpers;
pub mod list;
pub mod update;
