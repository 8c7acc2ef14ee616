use crate::{
    error::{ValidationError, ValidationErrorKind},
    Error, Result, Value,
};

use regex::Regex;

#[derive(Debug, Clone, serde::Serialize)]
pub struct StringConstraint {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,

    /// Pattern source; matching is anchored at the start of the value.
    pub pattern: Option<String>,

    #[serde(skip)]
    compiled: Option<Regex>,
}

impl StringConstraint {
    pub fn new(
        min_length: Option<usize>,
        max_length: Option<usize>,
        pattern: Option<&str>,
    ) -> Result<Self> {
        let compiled = match pattern {
            Some(pattern) => Some(
                Regex::new(&format!("^(?:{pattern})"))
                    .map_err(|err| Error::invalid_schema(format!("bad string pattern: {err}")))?,
            ),
            None => None,
        };
        Ok(StringConstraint {
            min_length,
            max_length,
            pattern: pattern.map(Into::into),
            compiled,
        })
    }

    /// A Text column: no length cap, no pattern.
    pub fn text() -> Self {
        StringConstraint {
            min_length: None,
            max_length: None,
            pattern: None,
            compiled: None,
        }
    }

    pub fn transform(&self, raw: &serde_json::Value) -> Result<Value, ValidationError> {
        match raw {
            serde_json::Value::String(value) => Ok(Value::String(value.trim().to_string())),
            // Numbers stringify; anything else is not a string coercion.
            serde_json::Value::Number(value) => Ok(Value::String(value.to_string())),
            _ => Err(ValidationError::incorrect_format(format!(
                "impossible to bring {raw} to string"
            ))),
        }
    }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let Value::String(value) = value else {
            return Ok(());
        };
        let len = value.chars().count();
        if let Some(min_length) = self.min_length {
            if len < min_length {
                return Err(ValidationErrorKind::StringMinLength { bound: min_length }.into());
            }
        }
        if let Some(max_length) = self.max_length {
            if len > max_length {
                return Err(ValidationErrorKind::StringMaxLength { bound: max_length }.into());
            }
        }
        if let Some(compiled) = &self.compiled {
            if !compiled.is_match(value) {
                return Err(ValidationErrorKind::StringPattern.into());
            }
        }
        Ok(())
    }
}
