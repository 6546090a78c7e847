use strata_model::ModelError;
use strata_provider::ProviderError;

#[test]
fn codes_are_stable() {
    let cases = [
        (ProviderError::InvalidPath("x".into()), "invalid_path"),
        (ProviderError::UnregisteredEntityType("T"), "unregistered_entity_type"),
        (
            ProviderError::IdGeneration(strata_types::Error::IdExhausted("p".into())),
            "id_generation",
        ),
        (ProviderError::AlreadyExists("a/b".into()), "already_exists"),
        (ProviderError::NotFound("a/b".into()), "not_found"),
        (ProviderError::Conversion { type_key: "t".into() }, "conversion"),
        (ModelError::InvalidDraft("bad".into()).into(), "invalid_draft"),
        (ModelError::UnregisteredEntityType("T").into(), "unregistered_entity_type"),
        (ModelError::EmptyTypeKey.into(), "model"),
    ];
    for (err, code) in cases {
        assert_eq!(err.code(), code, "{err}");
    }
}

#[test]
fn display_messages() {
    assert_eq!(
        ProviderError::AlreadyExists("tasks/t1".into()).to_string(),
        "entity already exists: tasks/t1"
    );
    assert_eq!(
        ProviderError::Conversion { type_key: "task".into() }.to_string(),
        "conversion failed for type key \"task\""
    );
    assert_eq!(
        ProviderError::from(ModelError::InvalidDraft("title is required".into())).to_string(),
        "invalid draft: title is required"
    );
}

#[test]
fn id_generation_keeps_source() {
    use std::error::Error as _;
    let err = ProviderError::IdGeneration(strata_types::Error::IdExhausted("p".into()));
    assert!(err.source().is_some());
}
