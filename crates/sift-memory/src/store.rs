use crate::PredicateProcessor;

use sift::Repository;
use sift_core::{
    filter::FilterBuilder,
    schema::{AttrSchema, ModelSchema},
    value::ValueRecord,
    Error, Result, Schema, Value,
};

use async_trait::async_trait;
use indexmap::IndexMap;

/// Ordered in-memory rows per model.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: IndexMap<String, Vec<ValueRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, model: impl Into<String>, record: ValueRecord) {
        self.tables.entry(model.into()).or_default().push(record);
    }

    pub fn rows(&self, model: &str) -> &[ValueRecord] {
        self.tables.get(model).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Compiles a filter mapping against `model` and returns the matching
    /// rows.
    pub fn query(
        &self,
        schema: &Schema,
        model: &ModelSchema,
        filters: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Vec<ValueRecord>> {
        let nodes = FilterBuilder::new(schema, model).build(filters)?;
        let predicate = PredicateProcessor::new(self, schema, model).compile(&nodes)?;
        Ok(self
            .rows(&model.full_name())
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect())
    }
}

/// [`Repository`] over a [`MemoryStore`], bound to one model.
pub struct MemoryRepository<'a> {
    store: &'a MemoryStore,
    model: &'a ModelSchema,

    /// The record being updated; `None` while validating a creation
    current: Option<ValueRecord>,
}

impl<'a> MemoryRepository<'a> {
    pub fn new(store: &'a MemoryStore, model: &'a ModelSchema) -> Self {
        MemoryRepository {
            store,
            model,
            current: None,
        }
    }

    /// Binds the record being updated so uniqueness probes exclude it.
    pub fn with_current(mut self, current: ValueRecord) -> Self {
        self.current = Some(current);
        self
    }

    fn relation(&self, name: &str) -> Result<&sift_core::schema::RelationSchema> {
        self.model
            .attr(name)
            .and_then(AttrSchema::as_relation)
            .ok_or_else(|| {
                Error::invalid_schema(format!(
                    "`{}` has no relation `{name}`",
                    self.model.full_name()
                ))
            })
    }

    fn find_related(&self, relation: &sift_core::schema::RelationSchema, key: &Value) -> Option<ValueRecord> {
        self.store
            .rows(&relation.to_model)
            .iter()
            .find(|row| row.get(&relation.remote_key) == key)
            .cloned()
    }
}

#[async_trait]
impl Repository for MemoryRepository<'_> {
    fn current(&self) -> Option<&ValueRecord> {
        self.current.as_ref()
    }

    async fn check_unique(&self, attr: &str, value: &Value) -> Result<bool> {
        let pk = self.model.sole_primary_key();
        let taken = self
            .store
            .rows(&self.model.full_name())
            .iter()
            .filter(|row| {
                // The record being updated does not collide with itself.
                match (&self.current, pk) {
                    (Some(current), Some(pk)) if row.get(pk) == current.get(pk) => false,
                    _ => true,
                }
            })
            .any(|row| row.get(attr) == value);
        Ok(!taken)
    }

    async fn get_related(&self, relation: &str, key: &Value) -> Result<Option<ValueRecord>> {
        let relation = self.relation(relation)?;
        Ok(self.find_related(relation, key))
    }

    async fn get_related_many(
        &self,
        relation: &str,
        keys: &[Value],
    ) -> Result<Vec<(Value, ValueRecord)>> {
        let relation = self.relation(relation)?;
        Ok(keys
            .iter()
            .filter_map(|key| {
                self.find_related(relation, key)
                    .map(|record| (key.clone(), record))
            })
            .collect())
    }
}
