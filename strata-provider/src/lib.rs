//! Data provider layer for Strata.
//!
//! # Architecture
//!
//! - [`DataProvider`] is the contract consumers depend on: fetch an entity by
//!   path, create one from a draft, listen to a collection, and convert raw
//!   plain objects through the converter registry
//! - [`Subscription`] is the push sequence every provider operation returns
//! - [`MemoryDataProvider`] is an in-process backend implementing the
//!   contract, with change notification for live subscriptions
//!
//! Failures that have a reason (creation) carry a [`ProviderError`]; lookups
//! that find nothing emit `None`.
//!
//! # Example
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//! use strata_model::{ConverterRegistry, Entity, EntityConverterConfig, JsonConverter};
//! use strata_provider::{DataProvider, MemoryDataProvider};
//! use strata_types::EntityPath;
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct Task {
//!     id: String,
//!     #[serde(rename = "typeKey")]
//!     type_key: String,
//!     title: String,
//! }
//!
//! impl Entity for Task {
//!     type Id = String;
//!     fn id(&self) -> &String { &self.id }
//!     fn type_key(&self) -> &str { &self.type_key }
//! }
//!
//! let registry = ConverterRegistry::from_configs([EntityConverterConfig::new(
//!     "task",
//!     JsonConverter::<Task>::for_type_key("task"),
//! )])
//! .unwrap();
//! let provider = MemoryDataProvider::new(registry);
//!
//! let tasks = EntityPath::collection("tasks").unwrap();
//! let draft = provider.create_draft::<Task>(json!({"title": "buy milk"})).unwrap();
//! let created = provider
//!     .create_entity(&tasks, draft)
//!     .try_next()
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(created.title, "buy milk");
//!
//! let unknown: Option<Task> = provider.convert_into_entity(&json!({"typeKey": "unknown"}));
//! assert!(unknown.is_none());
//! ```

mod config;
mod error;
mod memory;
mod provider;
mod subscription;

pub use config::{GetEntityMode, MemoryProviderConfig};
pub use error::{ProviderError, ProviderResult};
pub use memory::MemoryDataProvider;
pub use provider::DataProvider;
pub use subscription::{Emitter, Subscription};
