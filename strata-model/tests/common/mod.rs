//! Shared fixtures: a serde-backed `Task` and a hand-written `Note` converter.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use strata_model::{
    type_key_of, ConverterRegistry, Draft, Entity, EntityConverter, EntityConverterConfig,
    JsonConverter, ModelError, ModelResult,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "typeKey")]
    pub type_key: String,
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

impl Entity for Task {
    type Id = Option<String>;

    fn id(&self) -> &Option<String> {
        &self.id
    }

    fn type_key(&self) -> &str {
        &self.type_key
    }
}

pub fn task(id: &str, title: &str) -> Task {
    Task {
        id: Some(id.to_string()),
        type_key: "task".to_string(),
        title: title.to_string(),
        done: false,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: String,
    pub body: String,
    pub pinned: bool,
}

impl Entity for Note {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }

    fn type_key(&self) -> &str {
        "note"
    }
}

/// Requires a non-empty `body`; `pinned` defaults to false.
pub struct NoteConverter;

impl EntityConverter for NoteConverter {
    type Entity = Note;

    fn to_plain_object(&self, note: &Note) -> ModelResult<Value> {
        Ok(json!({
            "id": note.id,
            "typeKey": "note",
            "body": note.body,
            "pinned": note.pinned,
        }))
    }

    fn from_plain_object(&self, value: &Value) -> Option<Note> {
        if type_key_of(value) != Some("note") {
            return None;
        }
        Some(Note {
            id: value.get("id")?.as_str()?.to_string(),
            body: value.get("body")?.as_str()?.to_string(),
            pinned: value.get("pinned").and_then(Value::as_bool).unwrap_or(false),
        })
    }

    fn create_draft(&self, data: Value) -> ModelResult<Draft<Note>> {
        let body = data
            .get("body")
            .and_then(Value::as_str)
            .ok_or_else(|| ModelError::InvalidDraft("body is required".to_string()))?;
        if body.is_empty() {
            return Err(ModelError::InvalidDraft("body cannot be empty".to_string()));
        }
        let pinned = data.get("pinned").and_then(Value::as_bool).unwrap_or(false);

        let mut fields = Map::new();
        fields.insert("body".to_string(), Value::from(body));
        fields.insert("pinned".to_string(), Value::from(pinned));
        Ok(Draft::new(fields))
    }
}

pub fn registry() -> ConverterRegistry {
    ConverterRegistry::from_configs([
        EntityConverterConfig::new("task", JsonConverter::<Task>::for_type_key("task")),
        EntityConverterConfig::new("note", NoteConverter),
    ])
    .unwrap()
}
