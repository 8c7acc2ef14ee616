use tests::{schema, seeded_store, EMPLOYEE};

use pretty_assertions::assert_eq;
use serde_json::json;
use sift::ModelValidator;
use sift_core::Value;
use sift_memory::MemoryRepository;

fn data(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().unwrap().clone()
}

fn base() -> serde_json::Value {
    json!({ "name": "carol", "hired_on": "2024-03-01" })
}

fn with_department(department: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    let mut map = data(base());
    map.insert("department".into(), department);
    map
}

#[tokio::test]
async fn relation_replaces_its_local_key_in_the_available_set() {
    let schema = schema();
    let model = schema.model(EMPLOYEE);
    let validator = ModelValidator::build(model).unwrap();

    assert!(validator.is_available("department"));
    assert!(!validator.is_available("department_id"));
    assert!(validator.required_attrs().any(|attr| attr == "department"));
}

#[tokio::test]
async fn raw_identifier_is_coerced_through_the_key_column() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    // The key column is an integer, so a numeric string coerces first.
    let clean = validator
        .validate(&with_department(json!("2")), &repo)
        .await
        .unwrap();
    assert_eq!(
        clean["department"].expect_record().get("name"),
        &Value::String("sales".into())
    );
}

#[tokio::test]
async fn object_input_resolves_through_its_remote_key() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    let clean = validator
        .validate(&with_department(json!({ "id": 3, "name": "ignored" })), &repo)
        .await
        .unwrap();
    assert_eq!(
        clean["department"].expect_record().get("name"),
        &Value::String("support".into())
    );
}

#[tokio::test]
async fn resolution_miss_is_not_found_not_a_coercion_error() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    let err = validator
        .validate(&with_department(json!(99)), &repo)
        .await
        .unwrap_err();
    assert_eq!(
        err.as_validation().unwrap().export(),
        json!({ "department": { "code": "not_found", "params": {} } })
    );
}

#[tokio::test]
async fn bad_identifier_is_a_coercion_error() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    let err = validator
        .validate(&with_department(json!("not-a-key")), &repo)
        .await
        .unwrap_err();
    let report = err.as_validation().unwrap().export();
    assert_eq!(report["department"]["code"], json!("incorrect_format"));
}
