use super::{AttrError, ColumnValidator};
use crate::Repository;

use sift_core::{
    schema::{RelationKind, RelationSchema},
    ValidationError, Value,
};

/// Validator for a writable forward relation.
///
/// Callers supply either a raw identifier or an object carrying the target
/// key; either way the key is coerced through the replaced local-key column
/// and the row is resolved through the repository. A resolution miss is
/// `not_found`, never a coercion error.
#[derive(Debug, Clone)]
pub struct RelationValidator {
    schema: RelationSchema,
}

impl RelationValidator {
    pub fn bind(schema: &RelationSchema) -> Self {
        RelationValidator {
            schema: schema.clone(),
        }
    }

    pub fn schema(&self) -> &RelationSchema {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn local_key(&self) -> &str {
        &self.schema.local_key
    }

    /// Extracts and coerces the relation key from raw input without
    /// touching the repository. Bulk validation uses this to batch lookups.
    pub fn transform_key(
        &self,
        raw: &serde_json::Value,
        local: &ColumnValidator,
    ) -> Result<Value, ValidationError> {
        match raw {
            // An object stands for a related row; the target key field
            // identifies it.
            serde_json::Value::Object(fields) => match fields.get(&self.schema.remote_key) {
                Some(key) => local.transform(key),
                None => Err(ValidationError::incorrect_format(format!(
                    "related object for `{}` is missing its `{}` key",
                    self.schema.name, self.schema.remote_key
                ))),
            },
            raw => local.transform(raw),
        }
    }

    pub async fn validate(
        &self,
        raw: &serde_json::Value,
        local: &ColumnValidator,
        repo: &dyn Repository,
    ) -> Result<Value, AttrError> {
        let key = self.transform_key(raw, local)?;
        if key.is_null() {
            if !local.schema().nullable {
                return Err(ValidationError::non_nullable().into());
            }
            return Ok(Value::Null);
        }

        local.schema().constraint.check(&key)?;

        let related = repo.get_related(&self.schema.name, &key).await?;
        let Some(related) = related else {
            return Err(ValidationError::not_found().into());
        };

        // Forward one-to-one: the slot on the target side must be free.
        if self.schema.kind == RelationKind::OneToOne
            && !repo.check_unique(&self.schema.name, &key).await?
        {
            return Err(ValidationError::not_unique().into());
        }

        Ok(Value::Record(related))
    }
}
