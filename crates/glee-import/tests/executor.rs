use glee_import::{MemoryStore, NaturalKey, RecordStore, execute_import};
use glee_model::{ImportSummary, ValidatedRow};
use proptest::prelude::*;

fn fan(line: usize, email: &str) -> ValidatedRow {
    ValidatedRow::new(line)
        .with_text("first_name", "Fan")
        .with_text("email", email)
}

#[test]
fn failed_row_does_not_stop_the_batch() {
    let mut store = MemoryStore::new("email").failing_on("b@example.com", "permission denied");
    let rows = vec![
        fan(2, "a@example.com"),
        fan(3, "b@example.com"),
        fan(4, "c@example.com"),
    ];

    let summary = execute_import(&mut store, &rows, &NaturalKey::field("email"), 0, |_, _| {});

    assert_eq!(
        summary,
        ImportSummary {
            total: 3,
            successful: 2,
            failed: 1,
            duplicates: 0,
            errors: vec!["Failed to insert b@example.com: permission denied".to_string()],
        }
    );
    assert_eq!(store.attempts(), 3);
    assert_eq!(store.records()[1].cell("email"), "c@example.com");
}

#[test]
fn constraint_violation_is_reported_per_row() {
    let mut store = MemoryStore::new("email").with_record(&fan(1, "a@example.com"));
    let rows = vec![fan(2, "a@example.com"), fan(3, "d@example.com")];

    let summary = execute_import(&mut store, &rows, &NaturalKey::field("email"), 0, |_, _| {});

    assert_eq!(summary.failed, 1);
    assert_eq!(
        summary.errors,
        vec![
            "Failed to insert a@example.com: duplicate key value violates unique constraint on email"
        ]
    );
    assert!(summary.is_balanced());
}

#[test]
fn works_through_a_trait_object() {
    let mut store = MemoryStore::new("email");
    let dyn_store: &mut dyn RecordStore = &mut store;
    let summary = execute_import(
        dyn_store,
        &[fan(2, "a@example.com")],
        &NaturalKey::field("email"),
        1,
        |_, _| {},
    );
    assert_eq!(summary.total, 2);
    assert_eq!(summary.successful, 1);
}

proptest! {
    #[test]
    fn totals_always_balance(
        emails in proptest::collection::vec("[a-d]@x\\.org", 0..20),
        failing in "[a-d]@x\\.org",
        duplicates in 0usize..5,
    ) {
        let mut store = MemoryStore::new("email").failing_on(&failing, "boom");
        let rows: Vec<ValidatedRow> = emails
            .iter()
            .enumerate()
            .map(|(idx, email)| fan(idx + 2, email))
            .collect();

        let summary = execute_import(
            &mut store,
            &rows,
            &NaturalKey::field("email"),
            duplicates,
            |_, _| {},
        );

        prop_assert!(summary.is_balanced());
        prop_assert_eq!(summary.failed, summary.errors.len());
        prop_assert_eq!(store.attempts(), rows.len());
    }
}
