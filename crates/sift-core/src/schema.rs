mod attr;
pub use attr::AttrSchema;

mod column;
pub use column::ColumnSchema;

mod composite;
pub use composite::{CompositeKind, CompositeSchema};

pub mod constraint;
pub use constraint::Constraint;

mod enums;
pub use enums::{EnumMember, EnumRepr, EnumTy};

mod list;
pub use list::ListSchema;

mod model;
pub use model::ModelSchema;

mod property;
pub use property::{PropertyAccessor, PropertySchema};

mod relation;
pub use relation::{RelationKind, RelationSchema};

mod ty;
pub use ty::ScalarType;

use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::{Arc, OnceLock};

/// The full reflected schema: every record type plus the enumerations their
/// columns reference.
///
/// Built once at process start by [`crate::reflect`] and immutable
/// thereafter; all validation and filter compilation reads from it without
/// locking.
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct Schema {
    /// Record types, keyed by full name (`namespace.name`)
    pub models: IndexMap<String, ModelSchema>,

    /// Enumeration types referenced by Enum columns
    pub enums: IndexMap<String, EnumTy>,
}

static INSTALLED: OnceLock<Arc<Schema>> = OnceLock::new();

impl Schema {
    /// Get a model by full name.
    ///
    /// Panics on an unknown name; use [`Schema::get_model`] on paths fed by
    /// caller input.
    #[track_caller]
    pub fn model(&self, full_name: &str) -> &ModelSchema {
        self.models
            .get(full_name)
            .unwrap_or_else(|| panic!("unknown model `{full_name}`"))
    }

    pub fn get_model(&self, full_name: &str) -> Option<&ModelSchema> {
        self.models.get(full_name)
    }

    pub fn models(&self) -> impl Iterator<Item = &ModelSchema> {
        self.models.values()
    }

    pub fn get_enum(&self, name: &str) -> Option<&EnumTy> {
        self.enums.get(name)
    }

    /// Makes this schema the process-wide one.
    ///
    /// Rebuilding is not supported: a second install is a programming error
    /// and panics.
    pub fn install(self) -> Arc<Schema> {
        let schema = Arc::new(self);
        if INSTALLED.set(schema.clone()).is_err() {
            panic!("schema is already installed; rebuilding is not supported");
        }
        schema
    }

    /// The process-wide schema, if one has been installed.
    pub fn installed() -> Option<Arc<Schema>> {
        INSTALLED.get().cloned()
    }

    /// Serializes the schema document consumed by external callers (e.g. an
    /// API layer generating client-side forms).
    pub fn document(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(Error::from)
    }
}
