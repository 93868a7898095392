use thiserror::Error;

use crate::domain::EntityKind;

/// Errors surfaced by the store and everything built on top of it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("{kind} not found with id: {id}")]
    NotFound { kind: EntityKind, id: i64 },
    #[error("Store database error: {0}")]
    Database(String),
    #[error("Actor communication error: {0}")]
    ActorCommunication(String),
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: i64) -> Self {
        StoreError::NotFound { kind, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}
