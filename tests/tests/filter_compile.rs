use tests::{schema, EMPLOYEE};

use serde_json::json;
use sift_core::{
    filter::{ClauseKind, CompareOp, FilterBuilder, GroupKind},
    schema::ScalarType,
    Value,
};

fn filters(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().unwrap().clone()
}

#[test]
fn nested_groups_compile_to_the_expected_tree() {
    let schema = schema();
    let model = schema.model(EMPLOYEE);
    let builder = FilterBuilder::new(&schema, model);

    let nodes = builder
        .build(&filters(json!({
            "[or]": {
                "age": [">=", 18],
                "[and]": {
                    "age": ["<", 18],
                    "guardian_consent": ["==", true],
                },
            },
        })))
        .unwrap();

    let [or] = &nodes[..] else { panic!("one root node") };
    let or = or.as_group().unwrap();
    assert_eq!(or.kind, GroupKind::Or);
    assert_eq!(or.children.len(), 2);

    let age = or.children[0].as_clause().unwrap();
    assert_eq!(age.kind, ClauseKind::Compare(CompareOp::Gte));
    assert_eq!(age.value, Value::I64(18));

    let and = or.children[1].as_group().unwrap();
    assert_eq!(and.kind, GroupKind::And);
    let consent = and.children[1].as_clause().unwrap();
    assert_eq!(consent.field(), "guardian_consent");
    assert_eq!(consent.value, Value::Bool(true));
}

#[test]
fn relation_paths_resolve_against_the_target_schema() {
    let schema = schema();
    let model = schema.model(EMPLOYEE);
    let builder = FilterBuilder::new(&schema, model);

    let nodes = builder
        .build(&filters(json!({ "department.name": ["==", "sales"] })))
        .unwrap();

    let clause = nodes[0].as_clause().unwrap();
    // The clause is scoped to the related model's string column, not a
    // local attribute.
    assert_eq!(clause.ty, ScalarType::String);
    assert_eq!(clause.path, vec!["department".to_string(), "name".into()]);
    assert_eq!(clause.value, Value::String("sales".into()));
}

#[test]
fn terminal_relation_compares_its_stored_key() {
    let schema = schema();
    let model = schema.model(EMPLOYEE);
    let builder = FilterBuilder::new(&schema, model);

    let nodes = builder
        .build(&filters(json!({ "department": ["==", 2] })))
        .unwrap();
    let clause = nodes[0].as_clause().unwrap();
    assert_eq!(clause.ty, ScalarType::Integer);
    assert_eq!(clause.value, Value::I64(2));
}

#[test]
fn membership_values_coerce_element_wise() {
    let schema = schema();
    let model = schema.model(EMPLOYEE);
    let builder = FilterBuilder::new(&schema, model);

    let nodes = builder
        .build(&filters(json!({ "age": ["in", ["18", 21]] })))
        .unwrap();
    let clause = nodes[0].as_clause().unwrap();
    assert_eq!(clause.kind, ClauseKind::In);
    assert_eq!(clause.value, Value::List(vec![Value::I64(18), Value::I64(21)]));
}

#[test]
fn unregistered_type_operator_pairs_are_structural_errors() {
    let schema = schema();
    let model = schema.model(EMPLOYEE);
    let builder = FilterBuilder::new(&schema, model);

    for bad in [
        json!({ "guardian_consent": ["<", true] }),
        json!({ "age": ["startswith", "1"] }),
        json!({ "name": ["~=", "x"] }),
        json!({ "nope": ["==", 1] }),
        json!({ "age": [">=", 18, 21] }),
    ] {
        let err = builder.build(&filters(bad)).unwrap_err();
        assert!(err.is_invalid_filter(), "{err}");
    }
}

#[test]
fn empty_groups_are_rejected() {
    let schema = schema();
    let model = schema.model(EMPLOYEE);
    let builder = FilterBuilder::new(&schema, model);

    let err = builder.build(&filters(json!({ "[and]": {} }))).unwrap_err();
    assert!(err.is_invalid_filter());

    let err = builder.build(&filters(json!({ "[not]": 3 }))).unwrap_err();
    assert!(err.is_invalid_filter());
}
