use super::{Constraint, ScalarType};

/// One side of a computed property.
///
/// A property's read type may differ from its write type, so the two sides
/// are typed independently.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PropertyAccessor {
    pub ty: ScalarType,
    pub constraint: Constraint,
}

impl PropertyAccessor {
    pub fn new(constraint: Constraint) -> Self {
        PropertyAccessor {
            ty: constraint.scalar_type(),
            constraint,
        }
    }
}

/// Schema of a computed-property attribute.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PropertySchema {
    pub name: String,

    /// Full name of the owning record type
    pub owner: String,

    pub required: bool,

    /// Read side; absent for write-only properties
    pub getter: Option<PropertyAccessor>,

    /// Write side; a property with no setter is never available to callers
    pub setter: Option<PropertyAccessor>,
}

impl PropertySchema {
    pub fn writable(&self) -> bool {
        self.setter.is_some()
    }
}
