use super::AttrError;

use sift_core::{schema::PropertySchema, Value};

/// Validator for a computed property's write side.
///
/// Only the setter constraint participates in validation; the getter exists
/// for the schema document and may be typed differently.
#[derive(Debug, Clone)]
pub struct PropertyValidator {
    schema: PropertySchema,
}

impl PropertyValidator {
    pub fn bind(schema: &PropertySchema) -> Self {
        PropertyValidator {
            schema: schema.clone(),
        }
    }

    pub fn schema(&self) -> &PropertySchema {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn is_available(&self) -> bool {
        self.schema.writable()
    }

    pub fn is_required(&self) -> bool {
        self.schema.required && self.schema.writable()
    }

    pub fn validate(&self, raw: &serde_json::Value) -> Result<Value, AttrError> {
        let setter = self
            .schema
            .setter
            .as_ref()
            .expect("write-only validation on a property with no setter");

        let value = setter.constraint.transform(raw)?;
        if value.is_null() {
            // Properties express requiredness, not nullability: a supplied
            // null simply clears the property.
            return Ok(Value::Null);
        }
        setter.constraint.check(&value)?;
        Ok(value)
    }
}
