use glee_model::{
    FieldDescriptor, FieldKind, ImportProfile, ModelError, builtin_profiles, find_profile,
};

#[test]
fn builtin_profiles_are_valid() {
    for profile in builtin_profiles() {
        profile.validate().expect("builtin profile should validate");
        for example in &profile.example_rows {
            assert_eq!(
                example.len(),
                profile.fields.len(),
                "example row width for {}",
                profile.name
            );
        }
    }
}

#[test]
fn find_profile_is_case_insensitive() {
    let profiles = builtin_profiles();
    let profile = find_profile(&profiles, " Sheet-Music ").unwrap();
    assert_eq!(profile.natural_key, "title");

    let missing = find_profile(&profiles, "calendar").unwrap_err();
    assert_eq!(missing, ModelError::UnknownProfile("calendar".to_string()));
}

#[test]
fn profile_rejects_unknown_natural_key() {
    let profile = ImportProfile {
        name: "custom".into(),
        description: String::new(),
        fields: vec![FieldDescriptor::new("title", "Title").required()],
        natural_key: "isbn".into(),
        example_rows: Vec::new(),
    };
    assert!(matches!(
        profile.validate(),
        Err(ModelError::UnknownNaturalKey { .. })
    ));
}

#[test]
fn profile_rejects_duplicate_targets() {
    let profile = ImportProfile {
        name: "custom".into(),
        description: String::new(),
        fields: vec![
            FieldDescriptor::new("email", "Email"),
            FieldDescriptor::new("Email", "Email again"),
        ],
        natural_key: "email".into(),
        example_rows: Vec::new(),
    };
    assert!(matches!(
        profile.validate(),
        Err(ModelError::DuplicateField { .. })
    ));
}

#[test]
fn unbound_fields_clear_previous_bindings() {
    let mut profile = builtin_profiles().remove(0);
    profile.fields[0].source_column = Some("First".into());
    profile.fields[0].manual = true;

    let fields = profile.unbound_fields();
    assert!(fields.iter().all(|field| !field.is_bound() && !field.manual));
}

#[test]
fn profile_loads_from_json() {
    let json = r#"{
        "name": "robes",
        "fields": [
            {"target": "tag", "label": "Robe Tag", "required": true},
            {"target": "size", "label": "Size"},
            {"target": "owner_email", "label": "Owner", "kind": "email"}
        ],
        "natural_key": "tag"
    }"#;
    let profile: ImportProfile = serde_json::from_str(json).unwrap();
    profile.validate().unwrap();
    assert_eq!(profile.fields[2].kind, FieldKind::Email);
    assert!(profile.example_rows.is_empty());
}
