//! Error types for Kith Core

use crate::kind::Directionality;
use thiserror::Error;

/// Result type alias using Kith's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Kith error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid name: \"{0}\" is not one of 'First Last', 'First M. Last', 'Last, First', 'Last, First M.'")]
    InvalidName(String),

    #[error("Relationship \"{kind}\" is already declared as {existing}, cannot use it as {requested}")]
    KindConflict {
        kind: String,
        existing: Directionality,
        requested: Directionality,
    },

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error("Attribute \"{0}\" is reserved")]
    ReservedAttribute(String),

    #[error("\"{label}\" is already used as {used_as}")]
    AttributeConflict { label: String, used_as: String },

    #[error("Validation error: {0}")]
    Validation(#[from] crate::limits::ValidationError),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
