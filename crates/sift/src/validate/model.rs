use super::{
    AttrError, ColumnValidator, OneOfValidator, PropertyValidator, RelationValidator,
};
use crate::Repository;

use sift_core::{
    schema::ModelSchema, Error, ObjectErrors, Result, ValidationError, Value,
};

use indexmap::{IndexMap, IndexSet};

/// Validator for one record type, built once from its schema.
///
/// Construction computes the externally *available* and *required*
/// attribute sets by letting each attribute kind claim its visibility, in
/// the fixed order columns, relations, composites, properties. Binding
/// failures (a composite claiming a missing or required member) are fatal
/// schema errors, not runtime conditions.
#[derive(Debug, Clone)]
pub struct ModelValidator {
    model: ModelSchema,

    /// Every column, including hidden and claimed ones; composites and
    /// relations delegate member/key work here.
    columns: IndexMap<String, ColumnValidator>,

    /// Attributes callers may write
    available: IndexMap<String, AttrValidator>,

    /// Attributes that must be present on creation
    required: IndexSet<String>,
}

#[derive(Debug, Clone)]
enum AttrValidator {
    /// Name into the column map
    Column(String),
    Relation(RelationValidator),
    Composite(OneOfValidator),
    Property(PropertyValidator),
}

impl ModelValidator {
    pub fn build(model: &ModelSchema) -> Result<Self> {
        Self::build_inner(model, false)
    }

    pub(super) fn build_inner(model: &ModelSchema, in_list: bool) -> Result<Self> {
        let mut columns = IndexMap::new();
        let mut available = IndexMap::new();
        let mut required = IndexSet::new();

        for column in model.columns() {
            let validator = ColumnValidator::bind(column, model, in_list);
            if validator.is_available() {
                available.insert(
                    column.name.clone(),
                    AttrValidator::Column(column.name.clone()),
                );
                if validator.is_required() {
                    required.insert(column.name.clone());
                }
            }
            columns.insert(column.name.clone(), validator);
        }

        // A bound forward relation replaces its backing key column: callers
        // supply a related identifier, not the raw key.
        for relation in model.relations() {
            if !relation.is_forward() || relation.read_only {
                continue;
            }
            if !columns.contains_key(&relation.local_key) {
                return Err(Error::invalid_schema(format!(
                    "relation `{}.{}` names local key `{}`, which is not a column",
                    model.full_name(),
                    relation.name,
                    relation.local_key
                )));
            }
            if available.shift_remove(&relation.local_key).is_some() {
                available.insert(
                    relation.name.clone(),
                    AttrValidator::Relation(RelationValidator::bind(relation)),
                );
                if required.shift_remove(&relation.local_key) {
                    required.insert(relation.name.clone());
                }
            }
        }

        for composite in model.composites() {
            for member in &composite.attrs {
                if !available.contains_key(member) {
                    return Err(Error::invalid_schema(format!(
                        "`{}.{member}` is not available; cannot apply one-of composite `{}`",
                        model.full_name(),
                        composite.name
                    )));
                }
                if required.contains(member) {
                    return Err(Error::invalid_schema(format!(
                        "`{}.{member}` is required; cannot apply one-of composite `{}`",
                        model.full_name(),
                        composite.name
                    )));
                }
            }
            for member in &composite.attrs {
                available.shift_remove(member);
            }
            available.insert(
                composite.name.clone(),
                AttrValidator::Composite(OneOfValidator::bind(composite)),
            );
            if !composite.nullable {
                required.insert(composite.name.clone());
            }
        }

        for property in model.properties() {
            let validator = PropertyValidator::bind(property);
            if validator.is_available() {
                if validator.is_required() {
                    required.insert(property.name.clone());
                }
                available.insert(
                    property.name.clone(),
                    AttrValidator::Property(validator),
                );
            }
        }

        Ok(ModelValidator {
            model: model.clone(),
            columns,
            available,
            required,
        })
    }

    pub fn model(&self) -> &ModelSchema {
        &self.model
    }

    pub fn available_attrs(&self) -> impl Iterator<Item = &str> {
        self.available.keys().map(String::as_str)
    }

    pub fn required_attrs(&self) -> impl Iterator<Item = &str> {
        self.required.iter().map(String::as_str)
    }

    pub fn is_available(&self, attr: &str) -> bool {
        self.available.contains_key(attr)
    }

    pub(super) fn column(&self, name: &str) -> &ColumnValidator {
        &self.columns[name]
    }

    /// Coerces a primary-key value for lookups. Only single-column keys can
    /// be coerced this way.
    pub fn transform_pk(&self, raw: &serde_json::Value) -> Result<Value> {
        let Some(pk) = self.model.sole_primary_key() else {
            return Err(Error::invalid_schema(format!(
                "`{}` has a composite primary key",
                self.model.full_name()
            )));
        };
        self.columns[pk].transform(raw).map_err(|err| {
            let mut errors = ObjectErrors::new();
            errors.add(pk, err);
            Error::validation(errors)
        })
    }

    /// Validates a caller-supplied data map into a clean value map.
    ///
    /// Structural errors (unknown keys; missing required attributes on
    /// creation) abort before any attribute-level work. Past that, every
    /// supplied attribute is transformed and checked even when earlier ones
    /// fail, so the report carries the complete list of problems.
    pub async fn validate(
        &self,
        data: &serde_json::Map<String, serde_json::Value>,
        repo: &dyn Repository,
    ) -> Result<IndexMap<String, Value>> {
        let create = repo.current().is_none();
        let mut errors = ObjectErrors::new();

        for attr in data.keys() {
            if !self.available.contains_key(attr) {
                errors.add(attr, ValidationError::unexpected_attr());
            }
        }
        if create {
            for attr in &self.required {
                if !data.contains_key(attr) {
                    errors.add(attr, ValidationError::required_attr());
                }
            }
        }
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        let mut clean = IndexMap::new();
        for (attr, raw) in data {
            match self.validate_attr(attr, raw, repo).await {
                Ok(value) => {
                    clean.insert(attr.clone(), value);
                }
                Err(AttrError::Invalid(err)) => {
                    errors.add(attr, err);
                }
                Err(AttrError::Fault(err)) => return Err(err),
            }
        }
        if !errors.is_empty() {
            return Err(Error::validation(errors));
        }

        Ok(clean)
    }

    pub(super) async fn validate_attr(
        &self,
        attr: &str,
        raw: &serde_json::Value,
        repo: &dyn Repository,
    ) -> Result<Value, AttrError> {
        match &self.available[attr] {
            AttrValidator::Column(name) => self.columns[name].apply(raw, repo).await,
            AttrValidator::Relation(validator) => {
                let local = &self.columns[validator.local_key()];
                validator.validate(raw, local, repo).await
            }
            AttrValidator::Composite(validator) => {
                validator.validate(raw, &self.columns, repo).await
            }
            AttrValidator::Property(validator) => validator.validate(raw),
        }
    }

    pub(super) fn relation_validator(&self, attr: &str) -> Option<&RelationValidator> {
        match self.available.get(attr) {
            Some(AttrValidator::Relation(validator)) => Some(validator),
            _ => None,
        }
    }
}
