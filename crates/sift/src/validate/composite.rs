use super::{AttrError, ColumnValidator};
use crate::Repository;

use sift_core::{
    schema::CompositeSchema,
    value::ValueRecord,
    ValidationError, Value,
};

use indexmap::IndexMap;

/// The stored state of a one-of composite: member columns of which at most
/// one is set.
///
/// Mutual exclusion is enforced here, at the representation level: setting a
/// member clears whichever member was set before, so no sequence of writes
/// can leave two members populated.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOfValue {
    attrs: Vec<String>,
    current: Option<(String, Value)>,
}

impl OneOfValue {
    pub fn new(attrs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        OneOfValue {
            attrs: attrs.into_iter().map(Into::into).collect(),
            current: None,
        }
    }

    /// Sets a member, clearing the previously-set one. Setting null clears
    /// the composite entirely.
    pub fn set(&mut self, member: &str, value: Value) {
        assert!(
            self.attrs.iter().any(|attr| attr == member),
            "`{member}` is not a member of this composite"
        );
        if value.is_null() {
            self.current = None;
        } else {
            self.current = Some((member.to_string(), value));
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The currently-set member, if any.
    pub fn current(&self) -> Option<(&str, &Value)> {
        self.current
            .as_ref()
            .map(|(member, value)| (member.as_str(), value))
    }

    /// Reads one member; unset members read as null.
    pub fn get(&self, member: &str) -> &Value {
        match &self.current {
            Some((current, value)) if current == member => value,
            _ => &Value::Null,
        }
    }

    /// Expands into per-column values: the set member's value, null for all
    /// others. This is the shape the storage layer persists.
    pub fn to_record(&self) -> ValueRecord {
        self.attrs
            .iter()
            .map(|attr| (attr.clone(), self.get(attr).clone()))
            .collect()
    }
}

/// Validator for a one-of composite attribute.
///
/// Input is a `[member, value]` pair; the member must belong to the declared
/// set or the whole pair is rejected. Member-level failures are re-raised
/// with the member's name attached.
#[derive(Debug, Clone)]
pub struct OneOfValidator {
    schema: CompositeSchema,
}

impl OneOfValidator {
    pub fn bind(schema: &CompositeSchema) -> Self {
        OneOfValidator {
            schema: schema.clone(),
        }
    }

    pub fn schema(&self) -> &CompositeSchema {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub async fn validate(
        &self,
        raw: &serde_json::Value,
        columns: &IndexMap<String, ColumnValidator>,
        repo: &dyn Repository,
    ) -> Result<Value, AttrError> {
        if raw.is_null() {
            if !self.schema.nullable {
                return Err(ValidationError::non_nullable().into());
            }
            return Ok(Value::Record(OneOfValue::new(self.schema.attrs.clone()).to_record()));
        }

        let Some((member, value)) = as_pair(raw) else {
            return Err(ValidationError::incorrect_format(format!(
                "\"[member, value]\" pair expected, got {raw}"
            ))
            .into());
        };

        if !self.schema.is_member(member) {
            return Err(ValidationError::incorrect_format(format!(
                "`{member}` is not a member of `{}`",
                self.schema.name
            ))
            .into());
        }

        let column = columns
            .get(member)
            .expect("composite member column was verified at build time");

        let coerced = column.transform(value).map_err(|err| err.with_attr(member))?;
        match column.validate(&coerced, repo).await {
            Ok(()) => {}
            Err(AttrError::Invalid(err)) => return Err(err.with_attr(member).into()),
            Err(fault) => return Err(fault),
        }

        let mut state = OneOfValue::new(self.schema.attrs.clone());
        state.set(member, coerced);
        Ok(Value::Record(state.to_record()))
    }
}

fn as_pair(raw: &serde_json::Value) -> Option<(&str, &serde_json::Value)> {
    match raw.as_array().map(Vec::as_slice) {
        Some([member, value]) => member.as_str().map(|member| (member, value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_second_member_clears_first() {
        let mut value = OneOfValue::new(["email", "phone"]);
        value.set("email", Value::String("a@b.c".into()));
        value.set("phone", Value::String("555".into()));

        assert_eq!(value.get("email"), &Value::Null);
        assert_eq!(value.current(), Some(("phone", &Value::String("555".into()))));
    }

    #[test]
    fn setting_null_clears_the_composite() {
        let mut value = OneOfValue::new(["email", "phone"]);
        value.set("email", Value::String("a@b.c".into()));
        value.set("email", Value::Null);
        assert_eq!(value.current(), None);
    }
}
