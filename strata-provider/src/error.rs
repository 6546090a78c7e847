//! Error types for the provider layer.

use strata_model::ModelError;
use thiserror::Error;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Why a provider operation failed.
///
/// Lookups that find nothing are not errors; they emit `None`.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The path is malformed or of the wrong kind for the operation.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// No converter is registered for the requested entity type.
    #[error("no converter registered for entity type {0}")]
    UnregisteredEntityType(&'static str),

    /// The identifier generator failed.
    #[error("id generation failed: {0}")]
    IdGeneration(#[source] strata_types::Error),

    /// A document already exists at the path.
    #[error("entity already exists: {0}")]
    AlreadyExists(String),

    /// No document exists at the path.
    #[error("entity not found: {0}")]
    NotFound(String),

    /// The stored plain object could not be converted back into an entity.
    #[error("conversion failed for type key {type_key:?}")]
    Conversion { type_key: String },

    /// Converter registry or draft error.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ProviderError {
    /// Stable, machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPath(_) => "invalid_path",
            Self::UnregisteredEntityType(_) => "unregistered_entity_type",
            Self::IdGeneration(_) => "id_generation",
            Self::AlreadyExists(_) => "already_exists",
            Self::NotFound(_) => "not_found",
            Self::Conversion { .. } => "conversion",
            Self::Model(ModelError::InvalidDraft(_)) => "invalid_draft",
            Self::Model(ModelError::UnregisteredEntityType(_)) => "unregistered_entity_type",
            Self::Model(_) => "model",
        }
    }
}
