use super::ValidationError;

use indexmap::IndexMap;
use serde_json::json;

/// Per-field error report for one object.
///
/// Fields map to a leaf error, a nested object report (composites,
/// relations), or a per-index list report (child-row lists). Whole-object
/// failures that belong to no single field live in the `__root__` bucket.
/// Insertion order is preserved so the export is deterministic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ObjectErrors {
    errors: IndexMap<String, FieldErrors>,
    root: Vec<ValidationError>,
}

/// The error value recorded for a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrors {
    Leaf(ValidationError),
    Nested(ObjectErrors),
    List(ListErrors),
}

/// Per-index error report for bulk (list) validation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ListErrors {
    rows: IndexMap<usize, ObjectErrors>,
}

impl ObjectErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, error: impl Into<FieldErrors>) -> &mut Self {
        self.errors.insert(field.into(), error.into());
        self
    }

    pub fn add_root(&mut self, error: ValidationError) -> &mut Self {
        self.root.push(error);
        self
    }

    /// Folds another report into this one. Later entries win on field
    /// collisions, matching map-update semantics.
    pub fn merge(&mut self, other: ObjectErrors) -> &mut Self {
        self.errors.extend(other.errors);
        self.root.extend(other.root);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.root.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len() + if self.root.is_empty() { 0 } else { 1 }
    }

    pub fn get(&self, field: &str) -> Option<&FieldErrors> {
        self.errors.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Exports to the JSON object shape:
    /// `{"field": <leaf|nested|list>, ..., "__root__": [<leaf>, ...]}`.
    pub fn export(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (field, error) in &self.errors {
            map.insert(field.clone(), error.export());
        }
        if !self.root.is_empty() {
            let root: Vec<_> = self.root.iter().map(ValidationError::export).collect();
            map.insert("__root__".into(), json!(root));
        }
        serde_json::Value::Object(map)
    }
}

impl FieldErrors {
    pub fn export(&self) -> serde_json::Value {
        match self {
            FieldErrors::Leaf(error) => error.export(),
            FieldErrors::Nested(errors) => errors.export(),
            FieldErrors::List(errors) => errors.export(),
        }
    }

    pub fn as_leaf(&self) -> Option<&ValidationError> {
        match self {
            FieldErrors::Leaf(error) => Some(error),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListErrors> {
        match self {
            FieldErrors::List(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(error: ValidationError) -> Self {
        FieldErrors::Leaf(error)
    }
}

impl From<ObjectErrors> for FieldErrors {
    fn from(errors: ObjectErrors) -> Self {
        FieldErrors::Nested(errors)
    }
}

impl From<ListErrors> for FieldErrors {
    fn from(errors: ListErrors) -> Self {
        FieldErrors::List(errors)
    }
}

impl ListErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, index: usize, errors: ObjectErrors) -> &mut Self {
        self.rows.insert(index, errors);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, index: usize) -> Option<&ObjectErrors> {
        self.rows.get(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.rows.contains_key(&index)
    }

    /// Exports to the JSON list shape: `{"1": <object-level>, ...}`.
    pub fn export(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (index, errors) in &self.rows {
            map.insert(index.to_string(), errors.export());
        }
        serde_json::Value::Object(map)
    }
}
