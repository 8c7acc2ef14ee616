use super::AttrError;
use crate::Repository;

use sift_core::{
    schema::{ColumnSchema, ModelSchema},
    ValidationError, Value,
};

/// Validator for one column, built once from its schema.
#[derive(Debug, Clone)]
pub struct ColumnValidator {
    schema: ColumnSchema,

    /// Auto-registered when the schema marks the column unique or it is the
    /// sole primary key. Child-row validators never check uniqueness; that
    /// scope belongs to the owner, not the whole store.
    checks_unique: bool,
}

impl ColumnValidator {
    pub fn bind(schema: &ColumnSchema, model: &ModelSchema, in_list: bool) -> Self {
        let sole_pk = model.sole_primary_key() == Some(schema.name.as_str());
        ColumnValidator {
            schema: schema.clone(),
            checks_unique: !in_list && (schema.unique || sole_pk),
        }
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn is_available(&self) -> bool {
        !(self.schema.hidden || self.schema.read_only)
    }

    pub fn is_required(&self) -> bool {
        !self.schema.has_default
    }

    pub fn checks_unique(&self) -> bool {
        self.checks_unique
    }

    /// Coerces raw input into the column's value type.
    pub fn transform(&self, raw: &serde_json::Value) -> Result<Value, ValidationError> {
        self.schema.constraint.transform(raw)
    }

    /// Runs nullability, constraint checks, and the uniqueness probe.
    pub async fn validate(&self, value: &Value, repo: &dyn Repository) -> Result<(), AttrError> {
        if value.is_null() {
            if !self.schema.nullable {
                return Err(ValidationError::non_nullable().into());
            }
            return Ok(());
        }

        self.schema.constraint.check(value)?;

        if self.checks_unique && !repo.check_unique(&self.schema.name, value).await? {
            return Err(ValidationError::not_unique().into());
        }
        Ok(())
    }

    /// Transform and validate in one step, as the model validator applies
    /// per attribute.
    pub async fn apply(
        &self,
        raw: &serde_json::Value,
        repo: &dyn Repository,
    ) -> Result<Value, AttrError> {
        let value = self.transform(raw)?;
        self.validate(&value, repo).await?;
        Ok(value)
    }
}
