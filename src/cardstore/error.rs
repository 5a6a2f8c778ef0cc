use crate::validation::Violation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardError {
    #[error("Database is not connected")]
    NotReady,

    #[error("Card not found: {0}")]
    NotFound(String),

    #[error("Invalid card: {0}")]
    InvalidCard(Violation),

    #[error("Invalid instance id: {0:?}")]
    InvalidInstanceId(String),

    #[error("Invalid status code: {0}")]
    InvalidStatus(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, CardError>;
