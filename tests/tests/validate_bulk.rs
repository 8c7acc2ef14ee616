use tests::{schema, seeded_store, EMPLOYEE};

use pretty_assertions::assert_eq;
use serde_json::json;
use sift::{ListMode, ListValidator};
use sift_core::{schema::AttrSchema, Value};
use sift_memory::MemoryRepository;

fn rows(value: serde_json::Value) -> Vec<serde_json::Map<String, serde_json::Value>> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row.as_object().unwrap().clone())
        .collect()
}

fn notes_validator(schema: &sift_core::Schema) -> ListValidator {
    let list = schema
        .model(EMPLOYEE)
        .attr("notes")
        .and_then(AttrSchema::as_list)
        .unwrap();
    ListValidator::build(list).unwrap()
}

#[tokio::test]
async fn errors_are_tracked_per_row_index() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = notes_validator(&schema);

    // Row 0 is valid, row 1 violates a bound, row 2 supplies an unknown
    // attribute; only indices 1 and 2 appear in the report.
    let err = validator
        .validate_rows(
            &rows(json!([
                { "body": "fine", "rating": 4 },
                { "body": "fine", "rating": 9 },
                { "body": "fine", "nonexistent": 1 },
            ])),
            ListMode::Create,
            &repo,
        )
        .await
        .unwrap_err();

    let report = err.as_bulk_validation().unwrap().export();
    assert_eq!(
        report,
        json!({
            "1": { "rating": { "code": "columns.integer.lte", "params": { "value": 5 } } },
            "2": { "nonexistent": { "code": "unexpected_attr", "params": {} } },
        })
    );
}

#[tokio::test]
async fn valid_rows_produce_clean_maps() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = notes_validator(&schema);

    let clean = validator
        .validate_rows(
            &rows(json!([
                { "body": "  first  ", "rating": 4 },
                { "body": "second" },
            ])),
            ListMode::Create,
            &repo,
        )
        .await
        .unwrap();

    assert_eq!(clean[0]["body"], Value::String("first".into()));
    assert_eq!(clean[0]["rating"], Value::I64(4));
    // Row 1 never mentioned `rating`: unset, not null.
    assert!(!clean[1].contains_key("rating"));
}

#[tokio::test]
async fn patch_mode_distinguishes_unset_from_explicit_null() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = notes_validator(&schema);

    let clean = validator
        .validate_rows(
            &rows(json!([
                { "rating": null },
                {},
            ])),
            ListMode::Patch,
            &repo,
        )
        .await
        .unwrap();

    // Explicit null clears; absence leaves the column untouched.
    assert_eq!(clean[0]["rating"], Value::Null);
    assert!(!clean[1].contains_key("rating"));
}

#[tokio::test]
async fn relation_identifiers_resolve_in_one_batch() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = notes_validator(&schema);

    let clean = validator
        .validate_rows(
            &rows(json!([
                { "body": "a", "department": 1 },
                { "body": "b", "department": 2 },
                { "body": "c", "department": 1 },
            ])),
            ListMode::Create,
            &repo,
        )
        .await
        .unwrap();

    assert_eq!(
        clean[0]["department"].expect_record().get("name"),
        &Value::String("engineering".into())
    );
    assert_eq!(
        clean[1]["department"].expect_record().get("name"),
        &Value::String("sales".into())
    );
    assert_eq!(
        clean[2]["department"].expect_record().get("name"),
        &Value::String("engineering".into())
    );
}

#[tokio::test]
async fn missing_relation_rows_surface_per_index() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = notes_validator(&schema);

    let err = validator
        .validate_rows(
            &rows(json!([
                { "body": "a", "department": 1 },
                { "body": "b", "department": 99 },
            ])),
            ListMode::Create,
            &repo,
        )
        .await
        .unwrap_err();

    let report = err.as_bulk_validation().unwrap().export();
    assert_eq!(
        report,
        json!({
            "1": { "department": { "code": "not_found", "params": {} } },
        })
    );
}
