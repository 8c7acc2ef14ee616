use tests::{schema, seeded_store, EMPLOYEE};

use pretty_assertions::assert_eq;
use serde_json::json;
use sift::ModelValidator;
use sift_core::Value;
use sift_memory::MemoryRepository;

fn data(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().unwrap().clone()
}

#[tokio::test]
async fn creates_clean_value_map() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    let clean = validator
        .validate(
            &data(json!({
                "name": "  carol  ",
                "age": "42",
                "salary": "1500.5",
                "hired_on": "2024-03-01",
                "department": 1,
            })),
            &repo,
        )
        .await
        .unwrap();

    // Coercions: trimmed string, parsed int, decimal re-quantized to scale.
    assert_eq!(clean["name"], Value::String("carol".into()));
    assert_eq!(clean["age"], Value::I64(42));
    assert_eq!(clean["salary"], Value::Numeric("1500.50".parse().unwrap()));
    // The relation resolved to the related row, not the raw key.
    assert_eq!(clean["department"].expect_record().get("name"), &Value::String("engineering".into()));
}

#[tokio::test]
async fn unknown_attr_short_circuits_before_attribute_work() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    // The sibling `age` value is out of bounds, but the structural error
    // must be the only one reported.
    let err = validator
        .validate(
            &data(json!({ "nonexistent": 1, "age": 500 })),
            &repo,
        )
        .await
        .unwrap_err();

    let report = err.as_validation().unwrap().export();
    assert_eq!(
        report,
        json!({ "nonexistent": { "code": "unexpected_attr", "params": {} } })
    );
}

#[tokio::test]
async fn missing_required_attrs_are_reported_on_create() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    let err = validator.validate(&data(json!({})), &repo).await.unwrap_err();
    let report = err.as_validation().unwrap().export();

    for attr in ["name", "hired_on", "department"] {
        assert_eq!(report[attr], json!({ "code": "required_attr", "params": {} }));
    }
    // The replaced key column is spoken for by its relation.
    assert!(report.get("department_id").is_none());
}

#[tokio::test]
async fn constraint_violations_are_gathered_not_fail_fast() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    let err = validator
        .validate(
            &data(json!({
                "name": "x".repeat(60),
                "age": "150",
                "salary": "-3",
                "hired_on": "2024-03-01",
                "department": 1,
            })),
            &repo,
        )
        .await
        .unwrap_err();

    let report = err.as_validation().unwrap().export();
    assert_eq!(
        report["name"],
        json!({ "code": "columns.string.max_length", "params": { "value": 50 } })
    );
    // "150" coerces to 150 first, then violates the upper bound.
    assert_eq!(
        report["age"],
        json!({ "code": "columns.integer.lte", "params": { "value": 100 } })
    );
    assert_eq!(
        report["salary"],
        json!({ "code": "columns.numeric.gte", "params": { "value": "0.00" } })
    );
    assert!(report.get("hired_on").is_none());
}

#[tokio::test]
async fn explicit_null_on_non_nullable_column() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    let err = validator
        .validate(
            &data(json!({
                "name": null,
                "hired_on": "2024-03-01",
                "department": 1,
            })),
            &repo,
        )
        .await
        .unwrap_err();

    let report = err.as_validation().unwrap().export();
    assert_eq!(report["name"], json!({ "code": "non_nullable", "params": {} }));
}

#[tokio::test]
async fn number_coerces_to_string_column() {
    let schema = schema();
    let store = seeded_store();
    let model = schema.model(EMPLOYEE);
    let repo = MemoryRepository::new(&store, model);
    let validator = ModelValidator::build(model).unwrap();

    let clean = validator
        .validate(
            &data(json!({
                "name": 123,
                "hired_on": "2024-03-01",
                "department": 1,
            })),
            &repo,
        )
        .await
        .unwrap();
    assert_eq!(clean["name"], Value::String("123".into()));
}
