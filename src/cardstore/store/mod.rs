//! # Storage Layer
//!
//! The record engine never touches a concrete backend. It talks to the
//! [`KeyValueStore`] trait, a deliberately small synchronous primitive:
//!
//! | Method  | Meaning                                              |
//! |---------|------------------------------------------------------|
//! | `set`   | write text under a key, replacing any previous value |
//! | `get`   | read the text under a key, `None` when absent        |
//! | `remove`| delete a key; removing an absent key is not an error |
//! | `clear` | delete **every** key, across all namespaces          |
//! | `keys`  | enumerate every key currently held                   |
//!
//! There is no notion of namespaces at this level. One physical store holds the
//! records of every instance, told apart only by key prefix (see [`crate::keys`]).
//!
//! ## Implementations
//!
//! - [`memory::MemoryStore`]: process-local `HashMap`, used by tests and embedders.
//! - [`fs::FileStore`]: the whole key space in one JSON file, used by the CLI.
//!
//! Key enumeration order is unspecified for both.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract interface for the underlying key-value primitive.
///
/// Methods take `&self`; implementations handle their own interior mutability.
pub trait KeyValueStore: Send + Sync {
    /// Store `value` under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Read the value under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Remove `key` if present
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every key, regardless of namespace
    fn clear(&self) -> Result<()>;

    /// List every key currently present
    fn keys(&self) -> Result<Vec<String>>;
}
