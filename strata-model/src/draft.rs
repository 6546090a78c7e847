use crate::{ID_FIELD, TYPE_KEY_FIELD};
use serde_json::{Map, Value};
use std::fmt;
use std::marker::PhantomData;

/// Field data for a `T` that has not been created yet.
///
/// A draft never carries an identifier or a discriminator: both are assigned
/// by the provider when the entity is created. Reserved fields present in the
/// input are dropped.
pub struct Draft<T> {
    fields: Map<String, Value>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Draft<T> {
    pub fn new(mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        fields.remove(TYPE_KEY_FIELD);
        Self {
            fields,
            _entity: PhantomData,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Completes the draft into a plain object with the given identity.
    pub fn into_plain_object(self, id: &str, type_key: &str) -> Value {
        let mut fields = self.fields;
        fields.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
        fields.insert(TYPE_KEY_FIELD.to_string(), Value::String(type_key.to_string()));
        Value::Object(fields)
    }
}

impl<T> Clone for Draft<T> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Draft<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft")
            .field("entity", &std::any::type_name::<T>())
            .field("fields", &self.fields)
            .finish()
    }
}

impl<T> PartialEq for Draft<T> {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}
