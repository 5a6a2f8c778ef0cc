//! # Domain Model: Cards and Their Workflow Status
//!
//! A [`Card`] is the only persisted entity. It is stored as one JSON document per
//! key in the underlying [`KeyValueStore`](crate::store::KeyValueStore):
//!
//! ```text
//! {"id":"6f1c…","name":"Buy milk","status":"TODO","created":1700000000000,"lastUpdated":1700000000000}
//! ```
//!
//! ## Field Rules
//!
//! - `id` and `created` are assigned once, by `add_card`, and never change.
//! - `lastUpdated` starts equal to `created` and moves forward on every mutation.
//! - `description` and `status` are optional; absent fields are omitted on disk.
//!
//! The rules about what makes a card well-formed live in [`crate::validation`].
//! Inputs ([`NewCard`], [`CardPatch`]) are kept separate from the stored record so
//! callers can never supply an `id` or timestamps.

use crate::error::{CardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// The wire code for this status (`TODO`, `IN_PROGRESS`, `DONE`).
    pub fn code(&self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::InProgress => "IN_PROGRESS",
            Status::Done => "DONE",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Status {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        Status::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| CardError::InvalidStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    pub created: i64,
    #[serde(rename = "lastUpdated")]
    pub last_updated: i64,
}

impl Card {
    /// Builds a fresh record from caller input. Both timestamps are set to `now`.
    pub fn new(id: String, input: NewCard, now: i64) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            status: input.status,
            created: now,
            last_updated: now,
        }
    }

    /// Returns a copy with `patch` laid over it. `id` and `created` are kept;
    /// `last_updated` never moves backwards, even if the clock does.
    pub fn merged(&self, patch: &CardPatch, now: i64) -> Self {
        let mut card = self.clone();
        if let Some(name) = &patch.name {
            card.name = name.clone();
        }
        if let Some(description) = &patch.description {
            card.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            card.status = Some(status);
        }
        card.last_updated = now.max(self.last_updated).max(self.created);
        card
    }
}

/// Caller input for `add_card`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCard {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
}

impl NewCard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }
}

/// Partial update for `update_card_by_id`. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
}

impl CardPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_parse() {
        assert_eq!("TODO".parse::<Status>().unwrap(), Status::Todo);
        assert_eq!("IN_PROGRESS".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("DONE".parse::<Status>().unwrap(), Status::Done);
    }

    #[test]
    fn status_parse_is_case_sensitive() {
        let err = "todo".parse::<Status>().unwrap_err();
        assert!(matches!(err, CardError::InvalidStatus(code) if code == "todo"));
        assert!("BLOCKED".parse::<Status>().is_err());
    }

    #[test]
    fn card_json_uses_wire_names() {
        let card = Card::new(
            "abc".into(),
            NewCard::new("Buy milk").with_status(Status::InProgress),
            42,
        );
        let json: serde_json::Value = serde_json::to_value(&card).unwrap();

        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["lastUpdated"], 42);
        assert_eq!(json["created"], 42);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn card_parses_without_optional_fields() {
        let raw = r#"{"id":"x","name":"n","created":1,"lastUpdated":2}"#;
        let card: Card = serde_json::from_str(raw).unwrap();
        assert_eq!(card.description, None);
        assert_eq!(card.status, None);
        assert_eq!(card.last_updated, 2);
    }

    #[test]
    fn card_rejects_unknown_status_on_parse() {
        let raw = r#"{"id":"x","name":"n","status":"BLOCKED","created":1,"lastUpdated":1}"#;
        assert!(serde_json::from_str::<Card>(raw).is_err());
    }

    #[test]
    fn merge_overwrites_only_patched_fields() {
        let card = Card::new(
            "abc".into(),
            NewCard::new("Old").with_description("desc"),
            10,
        );
        let merged = card.merged(&CardPatch::status(Status::Done), 20);

        assert_eq!(merged.id, "abc");
        assert_eq!(merged.name, "Old");
        assert_eq!(merged.description.as_deref(), Some("desc"));
        assert_eq!(merged.status, Some(Status::Done));
        assert_eq!(merged.created, 10);
        assert_eq!(merged.last_updated, 20);
    }

    #[test]
    fn merge_never_moves_last_updated_backwards() {
        let card = Card::new("abc".into(), NewCard::new("Name"), 100);
        let merged = card.merged(&CardPatch::name("Other"), 50);
        assert_eq!(merged.last_updated, 100);
        assert!(merged.last_updated >= merged.created);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(CardPatch::default().is_empty());
        assert!(!CardPatch::description("x").is_empty());
    }
}
