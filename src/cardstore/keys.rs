//! Key namespacing.
//!
//! Every record key has three parts joined by [`DELIMITER`]:
//!
//! ```text
//! card:<instance id>:<card id>
//! └─┬┘ └─────┬─────┘ └───┬───┘
//!  tag   namespace     record
//! ```
//!
//! The namespace prefix (`card:<instance id>:`) is what separates one instance's
//! records from another's in the shared store. Membership is an anchored prefix
//! test: a key whose *tail* happens to contain another namespace's prefix does not
//! belong to it.
//!
//! Neither id may contain [`DELIMITER`]. Otherwise instance `a` would see the
//! records of instance `a:b`, whose keys all start with `card:a:`.

pub const RECORD_TAG: &str = "card";
pub const DELIMITER: char = ':';

/// Whether `id` can be used as an instance id or card id: non-empty and free of
/// [`DELIMITER`].
pub fn is_valid_segment(id: &str) -> bool {
    !id.is_empty() && !id.contains(DELIMITER)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpace {
    prefix: String,
}

impl KeySpace {
    pub fn new(instance_id: &str) -> Self {
        Self {
            prefix: format!("{RECORD_TAG}{DELIMITER}{instance_id}{DELIMITER}"),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn record_key(&self, card_id: &str) -> String {
        format!("{}{}", self.prefix, card_id)
    }

    /// True for keys of the form `<prefix><card id>` where the card id is a single
    /// segment.
    pub fn contains(&self, key: &str) -> bool {
        key.strip_prefix(self.prefix.as_str())
            .is_some_and(is_valid_segment)
    }

    /// Keys from `keys` that belong to this namespace, in input order.
    pub fn select<'a>(&'a self, keys: &'a [String]) -> impl Iterator<Item = &'a String> + 'a {
        keys.iter().filter(move |key| self.contains(key))
    }
}
