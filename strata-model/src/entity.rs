use serde_json::Value;
use std::fmt::Debug;

/// Plain-object field holding the entity identifier.
pub const ID_FIELD: &str = "id";

/// Plain-object field holding the type discriminator.
pub const TYPE_KEY_FIELD: &str = "typeKey";

/// A typed record managed by a data provider.
///
/// The identifier never changes once assigned. The type key selects the
/// converter responsible for the entity's plain-object representation.
pub trait Entity: Send + 'static {
    /// Identifier type. Plain objects carry it in string form.
    type Id: Clone + Debug + PartialEq + Send + 'static;

    fn id(&self) -> &Self::Id;

    fn type_key(&self) -> &str;
}

/// Reads the discriminator from a plain object, if present and a string.
pub fn type_key_of(value: &Value) -> Option<&str> {
    value.get(TYPE_KEY_FIELD).and_then(Value::as_str)
}
