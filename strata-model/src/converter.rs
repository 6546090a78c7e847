use crate::{Draft, Entity, ModelError, ModelResult};
use serde_json::{Map, Value};
use std::any::{type_name, Any, TypeId};
use std::sync::Arc;

/// Translates between plain JSON objects and one concrete entity type.
///
/// `from_plain_object(&to_plain_object(e)?)` must yield an entity equal to
/// `e` for every entity the converter accepts.
pub trait EntityConverter: Send + Sync + 'static {
    type Entity: Entity;

    /// Produces the storage representation of `entity`.
    fn to_plain_object(&self, entity: &Self::Entity) -> ModelResult<Value>;

    /// Parses a plain object. Returns `None` when the value does not have the
    /// expected shape.
    fn from_plain_object(&self, value: &Value) -> Option<Self::Entity>;

    /// Builds a draft from caller-supplied field data.
    /// Return `Err(ModelError::InvalidDraft(..))` to reject the payload.
    ///
    /// The default accepts any JSON object.
    fn create_draft(&self, data: Value) -> ModelResult<Draft<Self::Entity>> {
        match data {
            Value::Object(fields) => Ok(Draft::new(fields)),
            other => Err(ModelError::InvalidDraft(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Object-safe view of an [`EntityConverter`], so converters for different
/// entity types can share one registry. Implemented for every converter.
pub trait DynEntityConverter: Send + Sync {
    fn entity_type_id(&self) -> TypeId;

    fn entity_type_name(&self) -> &'static str;

    /// Fails with `TypeMismatch` if `entity` is not this converter's type.
    fn to_plain_object_any(&self, type_key: &str, entity: &dyn Any) -> ModelResult<Value>;

    fn from_plain_object_any(&self, value: &Value) -> Option<Box<dyn Any + Send>>;

    fn create_draft_fields(&self, data: Value) -> ModelResult<Map<String, Value>>;
}

impl<C: EntityConverter> DynEntityConverter for C {
    fn entity_type_id(&self) -> TypeId {
        TypeId::of::<C::Entity>()
    }

    fn entity_type_name(&self) -> &'static str {
        type_name::<C::Entity>()
    }

    fn to_plain_object_any(&self, type_key: &str, entity: &dyn Any) -> ModelResult<Value> {
        let entity = entity
            .downcast_ref::<C::Entity>()
            .ok_or_else(|| ModelError::TypeMismatch {
                type_key: type_key.to_string(),
                expected: type_name::<C::Entity>(),
                found: "another entity type",
            })?;
        self.to_plain_object(entity)
    }

    fn from_plain_object_any(&self, value: &Value) -> Option<Box<dyn Any + Send>> {
        self.from_plain_object(value)
            .map(|entity| Box::new(entity) as Box<dyn Any + Send>)
    }

    fn create_draft_fields(&self, data: Value) -> ModelResult<Map<String, Value>> {
        self.create_draft(data).map(Draft::into_fields)
    }
}

/// Pairs a type key with the converter responsible for it.
#[derive(Clone)]
pub struct EntityConverterConfig {
    pub type_key: String,
    pub converter: Arc<dyn DynEntityConverter>,
}

impl EntityConverterConfig {
    pub fn new<C: EntityConverter>(type_key: impl Into<String>, converter: C) -> Self {
        Self {
            type_key: type_key.into(),
            converter: Arc::new(converter),
        }
    }

    /// Wraps an already shared converter.
    pub fn shared(type_key: impl Into<String>, converter: Arc<dyn DynEntityConverter>) -> Self {
        Self {
            type_key: type_key.into(),
            converter,
        }
    }
}

impl std::fmt::Debug for EntityConverterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityConverterConfig")
            .field("type_key", &self.type_key)
            .field("entity", &self.converter.entity_type_name())
            .finish()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
