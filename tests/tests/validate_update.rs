use tests::{schema, seeded_store, DEPARTMENT};

use pretty_assertions::assert_eq;
use serde_json::json;
use sift::ModelValidator;
use sift_core::{value::ValueRecord, Value};
use sift_memory::MemoryRepository;

fn data(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().unwrap().clone()
}

#[tokio::test]
async fn update_does_not_enforce_required_attrs() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(DEPARTMENT);
    let mut current = ValueRecord::new();
    current.insert("id", 1i64).insert("name", "engineering");
    let repo = MemoryRepository::new(&store, model).with_current(current);
    let validator = ModelValidator::build(model).unwrap();

    let clean = validator
        .validate(&data(json!({ "name": "platform" })), &repo)
        .await
        .unwrap();
    assert_eq!(clean["name"], Value::String("platform".into()));
}

#[tokio::test]
async fn uniqueness_check_excludes_the_record_being_updated() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(DEPARTMENT);
    let mut current = ValueRecord::new();
    current.insert("id", 1i64).insert("name", "engineering");
    let repo = MemoryRepository::new(&store, model).with_current(current);
    let validator = ModelValidator::build(model).unwrap();

    // Re-submitting its own name is fine; another department's name is not.
    assert!(validator
        .validate(&data(json!({ "name": "engineering" })), &repo)
        .await
        .is_ok());

    let err = validator
        .validate(&data(json!({ "name": "sales" })), &repo)
        .await
        .unwrap_err();
    assert_eq!(
        err.as_validation().unwrap().export(),
        json!({ "name": { "code": "non_unique", "params": {} } })
    );
}

#[tokio::test]
async fn uniqueness_check_applies_on_create() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(DEPARTMENT);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    let err = validator
        .validate(&data(json!({ "name": "sales" })), &repo)
        .await
        .unwrap_err();
    assert_eq!(
        err.as_validation().unwrap().export(),
        json!({ "name": { "code": "non_unique", "params": {} } })
    );
}

#[tokio::test]
async fn transform_pk_coerces_lookup_keys() {
    let schema = schema();
    let model = schema.model(DEPARTMENT);
    let validator = ModelValidator::build(model).unwrap();

    assert_eq!(validator.transform_pk(&json!("7")).unwrap(), Value::I64(7));
    assert!(validator.transform_pk(&json!("seven")).is_err());
}
