use super::{AttrError, Input, ModelValidator};
use crate::Repository;

use sift_core::{
    schema::ListSchema, Error, ListErrors, ObjectErrors, Result, ValidationError, Value,
};

use indexmap::IndexMap;

/// Whether a bulk call creates rows or patches existing ones.
///
/// Creation enforces required attributes per row; patching lets rows omit
/// any attribute (the unset sentinel), expressing partial updates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ListMode {
    Create,
    Patch,
}

/// Bulk validator for an owned child-row list.
///
/// Applies the row model's validators across a batch, collecting errors per
/// row index. Forward-relation identifiers across all rows resolve through
/// one batched repository lookup instead of one round trip per row.
#[derive(Debug, Clone)]
pub struct ListValidator {
    schema: ListSchema,
    rows: ModelValidator,
}

impl ListValidator {
    pub fn build(schema: &ListSchema) -> Result<Self> {
        Ok(ListValidator {
            schema: schema.clone(),
            rows: ModelValidator::build_inner(&schema.row_model, true)?,
        })
    }

    pub fn schema(&self) -> &ListSchema {
        &self.schema
    }

    pub fn row_validator(&self) -> &ModelValidator {
        &self.rows
    }

    pub async fn validate_rows(
        &self,
        rows: &[serde_json::Map<String, serde_json::Value>],
        mode: ListMode,
        repo: &dyn Repository,
    ) -> Result<Vec<IndexMap<String, Value>>> {
        let mut row_errors: Vec<ObjectErrors> = vec![ObjectErrors::new(); rows.len()];
        let mut clean: Vec<IndexMap<String, Value>> = vec![IndexMap::new(); rows.len()];

        // Structural pre-check per row; rows that fail it skip the
        // attribute phase, exactly like the single-object path.
        let mut structural_ok = vec![true; rows.len()];
        for (idx, row) in rows.iter().enumerate() {
            let errors = &mut row_errors[idx];
            for attr in row.keys() {
                if !self.rows.is_available(attr) {
                    errors.add(attr, ValidationError::unexpected_attr());
                }
            }
            if mode == ListMode::Create {
                for attr in self.rows.required_attrs() {
                    if !row.contains_key(attr) {
                        errors.add(attr, ValidationError::required_attr());
                    }
                }
            }
            structural_ok[idx] = errors.is_empty();
        }

        // Attribute phase. Relation keys are coerced now but resolved later
        // in one batch per relation.
        let mut pending: IndexMap<String, Vec<(usize, Value)>> = IndexMap::new();
        let attrs: Vec<String> = self.rows.available_attrs().map(String::from).collect();
        for (idx, row) in rows.iter().enumerate() {
            if !structural_ok[idx] {
                continue;
            }
            for attr in &attrs {
                let input = Input::from_map(row, attr);
                if input.is_unset() {
                    continue;
                }
                let raw = input.as_json().unwrap();

                if let Some(relation) = self.rows.relation_validator(attr) {
                    let local = self.rows.column(relation.local_key());
                    match relation.transform_key(&raw, local) {
                        Ok(key) if key.is_null() => {
                            if local.schema().nullable {
                                clean[idx].insert(attr.clone(), Value::Null);
                            } else {
                                row_errors[idx].add(attr, ValidationError::non_nullable());
                            }
                        }
                        Ok(key) => match local.schema().constraint.check(&key) {
                            Ok(()) => {
                                pending.entry(attr.clone()).or_default().push((idx, key));
                            }
                            Err(err) => {
                                row_errors[idx].add(attr, err);
                            }
                        },
                        Err(err) => {
                            row_errors[idx].add(attr, err);
                        }
                    }
                    continue;
                }

                match self.rows.validate_attr(attr, &raw, repo).await {
                    Ok(value) => {
                        clean[idx].insert(attr.clone(), value);
                    }
                    Err(AttrError::Invalid(err)) => {
                        row_errors[idx].add(attr, err);
                    }
                    Err(AttrError::Fault(err)) => return Err(err),
                }
            }
        }

        // One repository round trip per relation attribute for the whole
        // batch, then redistribute hits and misses per row.
        for (attr, entries) in pending {
            let mut keys: Vec<Value> = Vec::new();
            for (_, key) in &entries {
                if !keys.contains(key) {
                    keys.push(key.clone());
                }
            }
            let resolved = repo.get_related_many(&attr, &keys).await?;
            for (idx, key) in entries {
                match resolved.iter().find(|(resolved_key, _)| *resolved_key == key) {
                    Some((_, record)) => {
                        clean[idx].insert(attr.clone(), Value::Record(record.clone()));
                    }
                    None => {
                        row_errors[idx].add(&attr, ValidationError::not_found());
                    }
                }
            }
        }

        let mut errors = ListErrors::new();
        for (idx, row) in row_errors.into_iter().enumerate() {
            if !row.is_empty() {
                errors.add(idx, row);
            }
        }
        if !errors.is_empty() {
            return Err(Error::bulk_validation(errors));
        }
        Ok(clean)
    }
}
