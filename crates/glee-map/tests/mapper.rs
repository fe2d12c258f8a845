use glee_map::{FieldMapper, MappingError, auto_map};
use glee_model::{FieldDescriptor, builtin_profiles, find_profile};
use proptest::prelude::*;

fn headers(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

#[test]
fn sheet_music_headers_bind_without_intervention() {
    let profiles = builtin_profiles();
    let profile = find_profile(&profiles, "sheet-music").unwrap();
    let mut mapper = FieldMapper::new(profile.unbound_fields());
    mapper.auto_map(&headers(&["Title", "Composer", "Voicing"]));

    let bound: Vec<(&str, Option<&str>)> = mapper
        .fields()
        .iter()
        .map(|f| (f.target.as_str(), f.source_column.as_deref()))
        .collect();
    assert_eq!(
        bound,
        vec![
            ("title", Some("Title")),
            ("composer", Some("Composer")),
            ("voicing", Some("Voicing")),
            ("arranger", None),
            ("copies", None),
        ]
    );
    assert!(mapper.ensure_complete().is_ok());
}

#[test]
fn fan_upload_requires_email_column() {
    let profiles = builtin_profiles();
    let profile = find_profile(&profiles, "fans").unwrap();
    let mut mapper = FieldMapper::new(profile.unbound_fields());
    mapper.auto_map(&headers(&["FirstName", "LastName", "Contact"]));

    assert_eq!(
        mapper.ensure_complete(),
        Err(MappingError::MissingRequired {
            labels: vec!["Email".to_string()]
        })
    );

    mapper.set_mapping_by_target("email", Some("Contact")).unwrap();
    assert!(mapper.ensure_complete().is_ok());
}

const WORDS: &[&str] = &["name", "email", "title", "voice", "part", "year", "phone"];

fn header_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(
        proptest::collection::vec(proptest::sample::select(WORDS), 1..3),
        1..6,
    )
    .prop_map(|cells| {
        let mut seen = std::collections::BTreeSet::new();
        cells
            .into_iter()
            .map(|words| words.join(" "))
            .filter(|header| seen.insert(header.to_lowercase()))
            .collect()
    })
}

fn field_strategy() -> impl Strategy<Value = Vec<FieldDescriptor>> {
    proptest::collection::btree_set(proptest::sample::select(WORDS), 1..5).prop_map(|targets| {
        targets
            .into_iter()
            .map(|target| FieldDescriptor::new(target, target.to_uppercase()))
            .collect()
    })
}

proptest! {
    #[test]
    fn exact_header_always_binds_to_its_field(
        headers in header_strategy(),
        fields in field_strategy(),
    ) {
        let mapped = auto_map(&headers, &fields);
        for field in &mapped {
            if let Some(exact) = headers.iter().find(|h| h.eq_ignore_ascii_case(&field.target)) {
                prop_assert_eq!(field.source_column.as_ref(), Some(exact));
            }
        }
    }

    #[test]
    fn auto_map_is_deterministic(
        headers in header_strategy(),
        fields in field_strategy(),
    ) {
        prop_assert_eq!(auto_map(&headers, &fields), auto_map(&headers, &fields));
    }
}
