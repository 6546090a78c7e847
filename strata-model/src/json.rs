use crate::{type_key_of, Entity, EntityConverter, ModelResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// Converter for entities whose plain object is their serde representation.
///
/// The entity's serde shape must name its identifier `id` and its
/// discriminator `typeKey` (e.g. `#[serde(rename = "typeKey")]`). When bound
/// to a type key, values carrying any other discriminator are refused.
pub struct JsonConverter<T> {
    type_key: Option<String>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> JsonConverter<T> {
    /// Accepts any discriminator the entity type itself accepts.
    pub fn new() -> Self {
        Self {
            type_key: None,
            _entity: PhantomData,
        }
    }

    /// Accepts only values whose discriminator equals `type_key`.
    pub fn for_type_key(type_key: impl Into<String>) -> Self {
        Self {
            type_key: Some(type_key.into()),
            _entity: PhantomData,
        }
    }

    pub fn type_key(&self) -> Option<&str> {
        self.type_key.as_deref()
    }
}

impl<T> Default for JsonConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for JsonConverter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonConverter")
            .field("entity", &std::any::type_name::<T>())
            .field("type_key", &self.type_key)
            .finish()
    }
}

impl<T> EntityConverter for JsonConverter<T>
where
    T: Entity + Serialize + DeserializeOwned,
{
    type Entity = T;

    fn to_plain_object(&self, entity: &T) -> ModelResult<Value> {
        Ok(serde_json::to_value(entity)?)
    }

    fn from_plain_object(&self, value: &Value) -> Option<T> {
        if !value.is_object() {
            return None;
        }
        if let Some(expected) = &self.type_key {
            if type_key_of(value) != Some(expected.as_str()) {
                return None;
            }
        }
        match serde_json::from_value(value.clone()) {
            Ok(entity) => Some(entity),
            Err(e) => {
                debug!("Plain object does not fit {}: {}", std::any::type_name::<T>(), e);
                None
            }
        }
    }
}
