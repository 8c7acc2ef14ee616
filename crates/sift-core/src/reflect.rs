//! Turns raw record-type descriptions handed over by the storage mapping
//! layer into the immutable [`Schema`] tree.
//!
//! Reflection is a two-phase build: a [`Dispatcher`] maps each raw field to
//! a generator (explicit per-field overrides first, then the closed kind
//! table), and a [`Builder`] assembles and cross-links the resulting
//! attribute schemas. Both phases run once at process start; failures are
//! programming errors in the schema declaration and abort loudly.

mod def;
pub use def::{
    AccessorDef, ColumnDef, ColumnTyDef, CompositeDef, FieldDef, FieldKind, ListDef, ModelDef,
    PropertyDef, RelationDef, RelationDirection,
};

mod dispatch;
pub use dispatch::{Context, Dispatcher, Generator};

mod builder;
pub use builder::Builder;
