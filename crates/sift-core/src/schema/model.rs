use super::{AttrSchema, ColumnSchema, CompositeSchema, ListSchema, PropertySchema, RelationSchema};

use indexmap::IndexMap;

/// The reflected schema of one record type.
///
/// Attribute names are unique within a model; the map preserves declaration
/// order, which drives validator construction and error ordering.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ModelSchema {
    pub namespace: String,

    pub name: String,

    /// Primary key column name(s)
    pub primary_key: Vec<String>,

    pub attrs: IndexMap<String, AttrSchema>,
}

impl ModelSchema {
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    pub fn attr(&self, name: &str) -> Option<&AttrSchema> {
        self.attrs.get(name)
    }

    /// The sole primary key column, if the key is not composite.
    pub fn sole_primary_key(&self) -> Option<&str> {
        match &self.primary_key[..] {
            [pk] => Some(pk),
            _ => None,
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &ColumnSchema> {
        self.attrs.values().filter_map(AttrSchema::as_column)
    }

    pub fn relations(&self) -> impl Iterator<Item = &RelationSchema> {
        self.attrs.values().filter_map(AttrSchema::as_relation)
    }

    pub fn composites(&self) -> impl Iterator<Item = &CompositeSchema> {
        self.attrs.values().filter_map(AttrSchema::as_composite)
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertySchema> {
        self.attrs.values().filter_map(AttrSchema::as_property)
    }

    pub fn lists(&self) -> impl Iterator<Item = &ListSchema> {
        self.attrs.values().filter_map(AttrSchema::as_list)
    }
}
