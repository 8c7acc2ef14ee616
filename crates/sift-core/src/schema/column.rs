use super::{Constraint, ScalarType};

/// Schema of a plain storage-backed column.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ColumnSchema {
    pub name: String,

    /// Full name of the owning record type
    pub owner: String,

    pub ty: ScalarType,

    /// Read-only columns are never writable by callers
    pub read_only: bool,

    /// Hidden columns are excluded from the available set entirely
    pub hidden: bool,

    pub nullable: bool,

    /// True when the storage layer supplies a value if the caller does not
    pub has_default: bool,

    pub unique: bool,

    /// Per-type value constraints; the variant always matches `ty`
    pub constraint: Constraint,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, owner: impl Into<String>, constraint: Constraint) -> Self {
        ColumnSchema {
            name: name.into(),
            owner: owner.into(),
            ty: constraint.scalar_type(),
            read_only: false,
            hidden: false,
            nullable: false,
            has_default: false,
            unique: false,
            constraint,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}
