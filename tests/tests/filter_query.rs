use tests::{schema, seeded_store, EMPLOYEE};

use serde_json::json;
use sift_core::Value;

fn filters(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().unwrap().clone()
}

fn names(rows: &[sift_core::value::ValueRecord]) -> Vec<&str> {
    rows.iter().map(|row| row.get("name").as_str().unwrap()).collect()
}

#[test]
fn adult_or_consenting_minor() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);

    // OR(age>=18, AND(age<18, guardian_consent==true)) matches both the
    // adult and the minor with consent.
    let rows = store
        .query(
            &schema,
            model,
            &filters(json!({
                "[or]": {
                    "age": [">=", 18],
                    "[and]": {
                        "age": ["<", 18],
                        "guardian_consent": ["==", true],
                    },
                },
            })),
        )
        .unwrap();
    assert_eq!(names(&rows), vec!["alice", "bob"]);

    let rows = store
        .query(&schema, model, &filters(json!({ "age": [">=", 18] })))
        .unwrap();
    assert_eq!(names(&rows), vec!["alice"]);
}

#[test]
fn top_level_entries_conjoin() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);

    let rows = store
        .query(
            &schema,
            model,
            &filters(json!({
                "age": ["<", 100],
                "name": ["startswith", "b"],
            })),
        )
        .unwrap();
    assert_eq!(names(&rows), vec!["bob"]);
}

#[test]
fn not_negates_the_conjunction_of_children() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);

    let rows = store
        .query(
            &schema,
            model,
            &filters(json!({
                "[not]": {
                    "age": [">=", 18],
                    "name": ["==", "alice"],
                },
            })),
        )
        .unwrap();
    assert_eq!(names(&rows), vec!["bob"]);
}

#[test]
fn relation_path_filters_against_the_related_row() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);

    let rows = store
        .query(
            &schema,
            model,
            &filters(json!({ "department.name": ["==", "engineering"] })),
        )
        .unwrap();
    assert_eq!(names(&rows), vec!["alice"]);
}

#[test]
fn membership_and_string_operators() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);

    let rows = store
        .query(&schema, model, &filters(json!({ "name": ["in", ["bob", "zed"]] })))
        .unwrap();
    assert_eq!(names(&rows), vec!["bob"]);

    let rows = store
        .query(&schema, model, &filters(json!({ "name": ["contains", "lic"] })))
        .unwrap();
    assert_eq!(names(&rows), vec!["alice"]);

    let rows = store
        .query(&schema, model, &filters(json!({ "name": ["not_in", ["alice"]] })))
        .unwrap();
    assert_eq!(names(&rows), vec!["bob"]);
}

#[test]
fn null_fields_never_match_ordering_comparisons() {
    let schema = schema();
    let mut store = seeded_store();
    let mut carol = sift_core::value::ValueRecord::new();
    carol.insert("id", 3i64).insert("name", "carol");
    store.insert(EMPLOYEE, carol);

    let model = schema.model(EMPLOYEE);
    let rows = store
        .query(&schema, model, &filters(json!({ "age": ["<", 200] })))
        .unwrap();
    // carol has no age; she matches neither side of an ordering compare.
    assert_eq!(names(&rows), vec!["alice", "bob"]);

    let rows = store
        .query(&schema, model, &filters(json!({ "age": ["==", null] })))
        .unwrap();
    assert_eq!(names(&rows), vec!["carol"]);
}
