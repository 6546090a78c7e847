//! Error types for the model layer.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while registering converters or building drafts.
///
/// Conversion of a raw value into an entity never produces one of these:
/// a value that does not fit is reported as absence.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A converter is already registered under this type key.
    #[error("duplicate type key: {0}")]
    DuplicateTypeKey(String),

    /// Type keys must be non-empty.
    #[error("type key cannot be empty")]
    EmptyTypeKey,

    /// No converter is registered under this type key.
    #[error("unknown type key: {0}")]
    UnknownTypeKey(String),

    /// No converter is registered for this entity type.
    #[error("no converter registered for entity type {0}")]
    UnregisteredEntityType(&'static str),

    /// The converter under a type key handles a different entity type.
    #[error("converter for {type_key:?} handles {expected}, not {found}")]
    TypeMismatch {
        type_key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The creation payload was rejected.
    #[error("invalid draft: {0}")]
    InvalidDraft(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
