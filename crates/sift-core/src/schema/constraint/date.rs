use crate::{
    error::{ValidationError, ValidationErrorKind},
    Value,
};

use chrono::NaiveDate;

#[derive(Debug, Clone, serde::Serialize)]
pub struct DateConstraint {
    pub gte: Option<NaiveDate>,
    pub lte: Option<NaiveDate>,

    /// Display format hint for the schema document
    pub fmt: String,
}

impl Default for DateConstraint {
    fn default() -> Self {
        DateConstraint {
            gte: None,
            lte: None,
            fmt: "%Y-%m-%d".to_string(),
        }
    }
}

impl DateConstraint {
    pub fn bounded(gte: Option<NaiveDate>, lte: Option<NaiveDate>) -> Self {
        DateConstraint {
            gte,
            lte,
            ..Self::default()
        }
    }

    pub fn transform(&self, raw: &serde_json::Value) -> Result<Value, ValidationError> {
        match raw {
            serde_json::Value::String(value) => match value.parse::<NaiveDate>() {
                Ok(date) => Ok(Value::Date(date)),
                Err(err) => Err(ValidationError::incorrect_format(format!(
                    "incorrect date value, {err}"
                ))),
            },
            _ => Err(ValidationError::incorrect_format(format!(
                "impossible to bring {raw} to date"
            ))),
        }
    }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let Value::Date(value) = value else {
            return Ok(());
        };
        if let Some(gte) = self.gte {
            if *value < gte {
                return Err(ValidationErrorKind::DateGte { bound: gte }.into());
            }
        }
        if let Some(lte) = self.lte {
            if *value > lte {
                return Err(ValidationErrorKind::DateLte { bound: lte }.into());
            }
        }
        Ok(())
    }
}
