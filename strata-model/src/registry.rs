use crate::{
    type_key_of, Draft, DynEntityConverter, Entity, EntityConverterConfig, ModelError, ModelResult,
};
use serde_json::Value;
use std::any::{type_name, Any, TypeId};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Maps type keys to converters and dispatches plain objects to them.
///
/// Each type key has exactly one converter. Several keys may share an entity
/// type; the first key registered for a type is the one assigned to drafts
/// of that type.
#[derive(Default, Clone)]
pub struct ConverterRegistry {
    converters: BTreeMap<String, Arc<dyn DynEntityConverter>>,
    keys_by_type: HashMap<TypeId, String>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a list of configs, failing on the first
    /// empty or duplicate type key.
    pub fn from_configs(configs: impl IntoIterator<Item = EntityConverterConfig>) -> ModelResult<Self> {
        let mut registry = Self::new();
        for config in configs {
            registry.register(config)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, config: EntityConverterConfig) -> ModelResult<()> {
        let EntityConverterConfig { type_key, converter } = config;
        if type_key.is_empty() {
            return Err(ModelError::EmptyTypeKey);
        }
        if self.converters.contains_key(&type_key) {
            return Err(ModelError::DuplicateTypeKey(type_key));
        }
        debug!(
            "Registered converter for {:?} ({})",
            type_key,
            converter.entity_type_name()
        );
        self.keys_by_type
            .entry(converter.entity_type_id())
            .or_insert_with(|| type_key.clone());
        self.converters.insert(type_key, converter);
        Ok(())
    }

    pub fn get(&self, type_key: &str) -> Option<&Arc<dyn DynEntityConverter>> {
        self.converters.get(type_key)
    }

    pub fn contains(&self, type_key: &str) -> bool {
        self.converters.contains_key(type_key)
    }

    /// Registered type keys in sorted order.
    pub fn type_keys(&self) -> impl Iterator<Item = &str> {
        self.converters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// The type key assigned to newly created entities of type `T`.
    pub fn type_key_for<T: Entity>(&self) -> Option<&str> {
        self.keys_by_type.get(&TypeId::of::<T>()).map(String::as_str)
    }

    /// Converts a plain object into a `T` using the converter registered
    /// under its discriminator.
    ///
    /// Returns `None` when the discriminator is missing, no converter is
    /// registered for it, the converter rejects the value, or the converter
    /// produces something other than a `T`.
    pub fn convert<T: Entity>(&self, raw: &Value) -> Option<T> {
        let Some(type_key) = type_key_of(raw) else {
            debug!("Plain object has no {:?} discriminator", crate::TYPE_KEY_FIELD);
            return None;
        };
        let Some(converter) = self.converters.get(type_key) else {
            debug!("No converter registered for type key {:?}", type_key);
            return None;
        };
        let entity = converter.from_plain_object_any(raw)?;
        match downcast::<T>(entity) {
            Some(entity) => Some(entity),
            None => {
                debug!(
                    "Converter for {:?} produced {}, not {}",
                    type_key,
                    converter.entity_type_name(),
                    type_name::<T>()
                );
                None
            }
        }
    }

    /// Converts `entity` into its plain object via the converter registered
    /// under the entity's own type key.
    pub fn to_plain_object<T: Entity>(&self, entity: &T) -> ModelResult<Value> {
        let type_key = entity.type_key();
        let converter = self
            .converters
            .get(type_key)
            .ok_or_else(|| ModelError::UnknownTypeKey(type_key.to_string()))?;
        if converter.entity_type_id() != TypeId::of::<T>() {
            return Err(ModelError::TypeMismatch {
                type_key: type_key.to_string(),
                expected: converter.entity_type_name(),
                found: type_name::<T>(),
            });
        }
        converter.to_plain_object_any(type_key, entity)
    }

    /// Builds a draft of `T` with the converter registered for `T`.
    pub fn create_draft<T: Entity>(&self, data: Value) -> ModelResult<Draft<T>> {
        let converter = self
            .type_key_for::<T>()
            .and_then(|key| self.converters.get(key))
            .ok_or(ModelError::UnregisteredEntityType(type_name::<T>()))?;
        converter.create_draft_fields(data).map(Draft::new)
    }
}

impl fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.converters
                    .iter()
                    .map(|(key, converter)| (key, converter.entity_type_name())),
            )
            .finish()
    }
}

fn downcast<T: Any>(entity: Box<dyn Any + Send>) -> Option<T> {
    entity.downcast::<T>().ok().map(|boxed| *boxed)
}
