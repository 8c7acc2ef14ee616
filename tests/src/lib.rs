//! Shared fixtures for the integration suite: a small personnel schema and
//! a seeded memory store.

use sift_core::{
    reflect::{
        Builder, ColumnDef, ColumnTyDef, CompositeDef, FieldKind, ListDef, ModelDef, RelationDef,
        RelationDirection,
    },
    schema::{constraint::IntWidth, CompositeKind, EnumTy},
    value::ValueRecord,
    Schema,
};
use sift_memory::MemoryStore;

pub const EMPLOYEE: &str = "directories.employee";
pub const DEPARTMENT: &str = "directories.department";
pub const EMPLOYEE_NOTE: &str = "directories.employee_note";

fn integer(width: IntWidth, gte: Option<i64>, lte: Option<i64>) -> ColumnTyDef {
    ColumnTyDef::Integer { width, gte, lte }
}

fn string(max_length: usize) -> ColumnTyDef {
    ColumnTyDef::String {
        min_length: None,
        max_length: Some(max_length),
        pattern: None,
    }
}

fn pk_column() -> ColumnDef {
    ColumnDef::new(integer(IntWidth::I64, None, None))
        .read_only()
        .with_default()
}

fn department() -> ModelDef {
    ModelDef::new("directories", "department")
        .primary_key(["id"])
        .field("id", FieldKind::Column(pk_column()))
        .field(
            "name",
            FieldKind::Column(ColumnDef::new(string(50)).unique()),
        )
}

fn employee() -> ModelDef {
    ModelDef::new("directories", "employee")
        .primary_key(["id"])
        .field("id", FieldKind::Column(pk_column()))
        .field("name", FieldKind::Column(ColumnDef::new(string(50))))
        .field(
            "age",
            FieldKind::Column(
                ColumnDef::new(integer(IntWidth::I32, Some(0), Some(100)))
                    .nullable()
                    .with_default(),
            ),
        )
        .field(
            "salary",
            FieldKind::Column(
                ColumnDef::new(ColumnTyDef::Numeric {
                    precision: 10,
                    scale: 2,
                    gte: Some("0.00".parse().unwrap()),
                    gt: None,
                    lte: None,
                    lt: None,
                })
                .nullable()
                .with_default(),
            ),
        )
        .field(
            "guardian_consent",
            FieldKind::Column(ColumnDef::new(ColumnTyDef::Boolean).nullable().with_default()),
        )
        .field(
            "status",
            FieldKind::Column(
                ColumnDef::new(ColumnTyDef::Enum {
                    enum_ty: "EmployeeStatus".into(),
                })
                .nullable()
                .with_default(),
            ),
        )
        .field(
            "hired_on",
            FieldKind::Column(ColumnDef::new(ColumnTyDef::Date {
                gte: None,
                lte: None,
            })),
        )
        .field(
            "email",
            FieldKind::Column(ColumnDef::new(string(100)).nullable().with_default()),
        )
        .field(
            "phone",
            FieldKind::Column(ColumnDef::new(string(20)).nullable().with_default()),
        )
        .field(
            "contact",
            FieldKind::Composite(CompositeDef {
                kind: CompositeKind::OneOf,
                attrs: vec!["email".into(), "phone".into()],
                nullable: true,
            }),
        )
        .field(
            "department_id",
            FieldKind::Column(ColumnDef::new(integer(IntWidth::I64, None, None))),
        )
        .field(
            "department",
            FieldKind::Relation(RelationDef {
                target: DEPARTMENT.into(),
                direction: RelationDirection::ManyToOne,
                uselist: false,
                local_key: "department_id".into(),
                remote_key: "id".into(),
                local_unique: false,
                read_only: None,
            }),
        )
        .field(
            "notes",
            FieldKind::List(ListDef {
                row_model: EMPLOYEE_NOTE.into(),
                owner_key: "employee_id".into(),
                row_number: "rn".into(),
            }),
        )
}

fn employee_note() -> ModelDef {
    ModelDef::new("directories", "employee_note")
        .row_of(EMPLOYEE)
        .primary_key(["id"])
        .field("id", FieldKind::Column(pk_column()))
        .field(
            "employee_id",
            FieldKind::Column(
                ColumnDef::new(integer(IntWidth::I64, None, None))
                    .read_only()
                    .with_default(),
            ),
        )
        .field(
            "rn",
            FieldKind::Column(
                ColumnDef::new(integer(IntWidth::I64, None, None))
                    .read_only()
                    .with_default(),
            ),
        )
        .field("body", FieldKind::Column(ColumnDef::new(string(200))))
        .field(
            "rating",
            FieldKind::Column(
                ColumnDef::new(integer(IntWidth::I32, Some(0), Some(5)))
                    .nullable()
                    .with_default(),
            ),
        )
        .field(
            "department_id",
            FieldKind::Column(
                ColumnDef::new(integer(IntWidth::I64, None, None))
                    .nullable()
                    .with_default(),
            ),
        )
        .field(
            "department",
            FieldKind::Relation(RelationDef {
                target: DEPARTMENT.into(),
                direction: RelationDirection::ManyToOne,
                uselist: false,
                local_key: "department_id".into(),
                remote_key: "id".into(),
                local_unique: false,
                read_only: None,
            }),
        )
        .field(
            "owner",
            FieldKind::Relation(RelationDef {
                target: EMPLOYEE.into(),
                direction: RelationDirection::ManyToOne,
                uselist: false,
                local_key: "employee_id".into(),
                remote_key: "id".into(),
                local_unique: false,
                read_only: None,
            }),
        )
}

pub fn schema() -> Schema {
    Builder::new()
        .enum_ty(EnumTy::str("EmployeeStatus", ["active", "suspended"]))
        .model(department())
        .model(employee())
        .model(employee_note())
        .build()
        .expect("fixture schema builds")
}

/// Seeds departments 1..=3 and a couple of employees.
pub fn seeded_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    for (id, name) in [(1i64, "engineering"), (2, "sales"), (3, "support")] {
        let mut record = ValueRecord::new();
        record.insert("id", id).insert("name", name);
        store.insert(DEPARTMENT, record);
    }

    let mut alice = ValueRecord::new();
    alice
        .insert("id", 1i64)
        .insert("name", "alice")
        .insert("age", 30i64)
        .insert("email", "alice@example.com")
        .insert("department_id", 1i64);
    store.insert(EMPLOYEE, alice);

    let mut bob = ValueRecord::new();
    bob.insert("id", 2i64)
        .insert("name", "bob")
        .insert("age", 17i64)
        .insert("guardian_consent", true)
        .insert("department_id", 2i64);
    store.insert(EMPLOYEE, bob);

    store
}
