mod common;

use common::{task, Note, NoteConverter, Task};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use strata_model::{EntityConverter, JsonConverter, ModelError};

// ── JsonConverter ────────────────────────────────────────────────

#[test]
fn json_to_plain_object_uses_serde_shape() {
    let converter = JsonConverter::<Task>::new();
    let plain = converter.to_plain_object(&task("t1", "buy milk")).unwrap();
    assert_eq!(
        plain,
        json!({"id": "t1", "typeKey": "task", "title": "buy milk", "done": false})
    );
}

#[test]
fn json_from_plain_object_parses() {
    let converter = JsonConverter::<Task>::new();
    let parsed = converter
        .from_plain_object(&json!({"id": "t1", "typeKey": "task", "title": "x", "done": true}))
        .unwrap();
    assert_eq!(parsed.title, "x");
    assert!(parsed.done);
}

#[test]
fn json_from_plain_object_missing_field_is_none() {
    let converter = JsonConverter::<Task>::new();
    assert!(converter
        .from_plain_object(&json!({"typeKey": "task"}))
        .is_none());
}

#[test]
fn json_from_plain_object_non_object_is_none() {
    let converter = JsonConverter::<Task>::new();
    assert!(converter.from_plain_object(&json!("task")).is_none());
    assert!(converter.from_plain_object(&json!(null)).is_none());
    assert!(converter.from_plain_object(&json!([1, 2])).is_none());
}

#[test]
fn json_bound_converter_rejects_other_discriminator() {
    let converter = JsonConverter::<Task>::for_type_key("task");
    assert_eq!(converter.type_key(), Some("task"));
    let value = json!({"typeKey": "chore", "title": "x"});
    assert!(converter.from_plain_object(&value).is_none());

    // The unbound converter accepts it.
    assert!(JsonConverter::<Task>::new().from_plain_object(&value).is_some());
}

#[test]
fn json_default_create_draft_accepts_object() {
    let converter = JsonConverter::<Task>::new();
    let draft = converter
        .create_draft(json!({"title": "buy milk", "done": false}))
        .unwrap();
    assert_eq!(draft.get("title"), Some(&json!("buy milk")));
}

#[test]
fn json_default_create_draft_rejects_non_object() {
    let converter = JsonConverter::<Task>::new();
    let err = converter.create_draft(json!(42)).unwrap_err();
    assert!(matches!(err, ModelError::InvalidDraft(ref msg) if msg.contains("a number")));
}

#[test]
fn create_draft_strips_identity_fields() {
    let converter = JsonConverter::<Task>::new();
    let draft = converter
        .create_draft(json!({"id": "forged", "typeKey": "forged", "title": "x"}))
        .unwrap();
    assert!(draft.get("id").is_none());
    assert!(draft.get("typeKey").is_none());
    assert_eq!(draft.fields().len(), 1);
}

// ── Hand-written converter ───────────────────────────────────────

#[test]
fn note_roundtrip() {
    let note = Note {
        id: "n1".into(),
        body: "hello".into(),
        pinned: true,
    };
    let plain = NoteConverter.to_plain_object(&note).unwrap();
    assert_eq!(NoteConverter.from_plain_object(&plain), Some(note));
}

#[test]
fn note_create_draft_validates_body() {
    let err = NoteConverter.create_draft(json!({"pinned": true})).unwrap_err();
    assert_eq!(err.to_string(), "invalid draft: body is required");

    let err = NoteConverter.create_draft(json!({"body": ""})).unwrap_err();
    assert_eq!(err.to_string(), "invalid draft: body cannot be empty");
}

#[test]
fn note_create_draft_fills_defaults() {
    let draft = NoteConverter.create_draft(json!({"body": "b"})).unwrap();
    assert_eq!(draft.get("pinned"), Some(&json!(false)));
}

// ── Round-trip law ───────────────────────────────────────────────

fn task_strategy() -> impl Strategy<Value = Task> {
    (
        proptest::option::of("[a-z0-9-]{1,16}"),
        "[a-z]{1,8}",
        ".{0,40}",
        any::<bool>(),
    )
        .prop_map(|(id, type_key, title, done)| Task {
            id,
            type_key,
            title,
            done,
        })
}

fn note_strategy() -> impl Strategy<Value = Note> {
    ("[a-z0-9-]{1,16}", ".{0,40}", any::<bool>()).prop_map(|(id, body, pinned)| Note {
        id,
        body,
        pinned,
    })
}

proptest! {
    #[test]
    fn json_converter_roundtrip_law(entity in task_strategy()) {
        let converter = JsonConverter::<Task>::new();
        let plain = converter.to_plain_object(&entity).unwrap();
        prop_assert_eq!(converter.from_plain_object(&plain), Some(entity));
    }

    #[test]
    fn note_converter_roundtrip_law(entity in note_strategy()) {
        let plain = NoteConverter.to_plain_object(&entity).unwrap();
        prop_assert_eq!(NoteConverter.from_plain_object(&plain), Some(entity));
    }
}
