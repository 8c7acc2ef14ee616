use crate::{
    error::{ValidationError, ValidationErrorKind},
    Value,
};

use chrono::NaiveTime;

#[derive(Debug, Clone, serde::Serialize)]
pub struct TimeConstraint {
    pub gte: Option<NaiveTime>,
    pub lte: Option<NaiveTime>,

    /// Display format hint for the schema document
    pub fmt: String,
}

impl Default for TimeConstraint {
    fn default() -> Self {
        TimeConstraint {
            gte: None,
            lte: None,
            fmt: "%H:%M:%S".to_string(),
        }
    }
}

impl TimeConstraint {
    pub fn bounded(gte: Option<NaiveTime>, lte: Option<NaiveTime>) -> Self {
        TimeConstraint {
            gte,
            lte,
            ..Self::default()
        }
    }

    pub fn transform(&self, raw: &serde_json::Value) -> Result<Value, ValidationError> {
        match raw {
            serde_json::Value::String(value) => match value.parse::<NaiveTime>() {
                Ok(time) => Ok(Value::Time(time)),
                Err(err) => Err(ValidationError::incorrect_format(format!(
                    "incorrect time value, {err}"
                ))),
            },
            _ => Err(ValidationError::incorrect_format(format!(
                "impossible to bring {raw} to time"
            ))),
        }
    }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let Value::Time(value) = value else {
            return Ok(());
        };
        if let Some(gte) = self.gte {
            if *value < gte {
                return Err(ValidationErrorKind::TimeGte { bound: gte }.into());
            }
        }
        if let Some(lte) = self.lte {
            if *value > lte {
                return Err(ValidationErrorKind::TimeLte { bound: lte }.into());
            }
        }
        Ok(())
    }
}
