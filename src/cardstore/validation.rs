//! Card validation.
//!
//! A card is well-formed when all three rules hold:
//!
//! ```text
//! valid_name && (no_description || valid_description) && (no_status || valid_status)
//! ```
//!
//! - **name**: required and non-empty.
//! - **description**: optional, but an empty string is not a description.
//! - **status**: optional; when present it is one of `TODO`, `IN_PROGRESS`, `DONE`.
//!   The [`Status`](crate::model::Status) type can only hold those three values, so
//!   that rule is enforced where text is parsed into a `Status`.
//!
//! Validation runs on the complete record that is about to be written (the new card
//! for `add_card`, the merged card for `update_card_by_id`), never on raw input.

use crate::model::{Card, Status};
use thiserror::Error;

/// The first rule a candidate card breaks.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[error("name must not be empty")]
    EmptyName,

    #[error("description must not be empty when present")]
    EmptyDescription,

    #[error("status must be one of TODO, IN_PROGRESS, DONE")]
    UnknownStatus,
}

pub fn validate(card: &Card) -> Result<(), Violation> {
    if !valid_name(&card.name) {
        return Err(Violation::EmptyName);
    }
    if !card.description.as_deref().map_or(true, valid_description) {
        return Err(Violation::EmptyDescription);
    }
    if !card.status.map_or(true, valid_status) {
        return Err(Violation::UnknownStatus);
    }
    Ok(())
}

pub fn is_valid(card: &Card) -> bool {
    validate(card).is_ok()
}

fn valid_name(name: &str) -> bool {
    !name.is_empty()
}

fn valid_description(description: &str) -> bool {
    !description.is_empty()
}

fn valid_status(status: Status) -> bool {
    Status::ALL.contains(&status)
}
