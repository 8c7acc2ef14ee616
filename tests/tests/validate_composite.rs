use tests::{schema, seeded_store, EMPLOYEE};

use pretty_assertions::assert_eq;
use serde_json::json;
use sift::{ModelValidator, OneOfValue};
use sift_core::Value;
use sift_memory::MemoryRepository;

fn data(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().unwrap().clone()
}

fn with_contact(contact: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    data(json!({
        "name": "carol",
        "hired_on": "2024-03-01",
        "department": 1,
        "contact": contact,
    }))
}

#[tokio::test]
async fn members_leave_the_available_set_for_the_composite() {
    let schema = schema();
    let model = schema.model(EMPLOYEE);
    let validator = ModelValidator::build(model).unwrap();

    assert!(validator.is_available("contact"));
    assert!(!validator.is_available("email"));
    assert!(!validator.is_available("phone"));
}

#[tokio::test]
async fn pair_input_sets_one_member_and_clears_the_rest() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    let clean = validator
        .validate(&with_contact(json!(["phone", "555-0100"])), &repo)
        .await
        .unwrap();

    let contact = clean["contact"].expect_record();
    assert_eq!(contact.get("phone"), &Value::String("555-0100".into()));
    assert_eq!(contact.get("email"), &Value::Null);
}

#[tokio::test]
async fn member_error_carries_the_member_name() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    let err = validator
        .validate(&with_contact(json!(["phone", "5".repeat(30)])), &repo)
        .await
        .unwrap_err();
    assert_eq!(
        err.as_validation().unwrap().export(),
        json!({
            "contact": {
                "code": "columns.string.max_length",
                "params": { "value": 20, "attr": "phone" },
            }
        })
    );
}

#[tokio::test]
async fn unknown_member_rejects_the_whole_pair() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    let err = validator
        .validate(&with_contact(json!(["fax", "555"])), &repo)
        .await
        .unwrap_err();
    let report = err.as_validation().unwrap().export();
    assert_eq!(report["contact"]["code"], json!("incorrect_format"));
}

#[test]
fn one_of_state_is_mutually_exclusive() {
    let mut state = OneOfValue::new(["email", "phone"]);
    state.set("email", Value::String("a@b.c".into()));
    assert_eq!(state.current(), Some(("email", &Value::String("a@b.c".into()))));

    state.set("phone", Value::String("555".into()));
    assert_eq!(state.get("email"), &Value::Null);
    assert_eq!(state.current(), Some(("phone", &Value::String("555".into()))));
}
