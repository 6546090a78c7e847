//! Entity model contracts for Strata.
//!
//! Defines the types every provider and converter agrees on:
//! - [`Entity`] — a typed record with an identifier and a type discriminator
//! - [`EntityConverter`] — translates between plain JSON objects and typed entities
//! - [`Draft`] — field data for an entity that has not been created yet
//! - [`EntityConverterConfig`] — pairs a type key with its converter
//! - [`ConverterRegistry`] — the type-key → converter map used for dispatch
//!
//! Plain objects are `serde_json::Value`s. The identifier lives under
//! [`ID_FIELD`] and the discriminator under [`TYPE_KEY_FIELD`].

mod converter;
mod draft;
mod entity;
mod error;
mod json;
mod registry;

pub use converter::{DynEntityConverter, EntityConverter, EntityConverterConfig};
pub use draft::Draft;
pub use entity::{type_key_of, Entity, ID_FIELD, TYPE_KEY_FIELD};
pub use error::{ModelError, ModelResult};
pub use json::JsonConverter;
pub use registry::ConverterRegistry;
