//! Core type definitions for Strata.
//!
//! This crate defines the entity-agnostic types the rest of the workspace
//! builds on:
//! - Entity identifiers (UUID v7)
//! - Identifier generators used when entities are created
//! - Collection and document paths
//!
//! Entity and converter contracts live in `strata-model`; providers live in
//! `strata-provider`.

mod generator;
mod ids;
mod path;

pub use generator::{IdGenerator, SequentialIdGenerator, UuidV7Generator};
pub use ids::EntityId;
pub use path::{EntityPath, PathKind, PATH_SEPARATOR};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("id generator exhausted: {0}")]
    IdExhausted(String),
}
