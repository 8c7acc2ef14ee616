use crate::{
    error::{ValidationError, ValidationErrorKind},
    Error, Result, Value,
};

use chrono::{DateTime, NaiveDateTime, Utc};

/// A datetime bound, naive or UTC-normalized to match the column's
/// timezone declaration.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum DateTimeBound {
    Naive(NaiveDateTime),
    Utc(DateTime<Utc>),
}

impl DateTimeBound {
    fn is_aware(self) -> bool {
        matches!(self, Self::Utc(_))
    }

    fn to_value(self) -> Value {
        match self {
            Self::Naive(value) => Value::DateTime(value),
            Self::Utc(value) => Value::DateTimeTz(value),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct DateTimeConstraint {
    /// Whether values must carry timezone information. A mismatch is its own
    /// error, never silently corrected.
    pub with_timezone: bool,

    pub gte: Option<DateTimeBound>,
    pub lte: Option<DateTimeBound>,

    /// Display format hint for the schema document
    pub fmt: String,
}

impl DateTimeConstraint {
    pub fn new(
        with_timezone: bool,
        gte: Option<DateTimeBound>,
        lte: Option<DateTimeBound>,
    ) -> Result<Self> {
        for bound in [gte, lte].into_iter().flatten() {
            if bound.is_aware() != with_timezone {
                return Err(Error::invalid_schema(
                    "datetime bound timezone does not match the column's timezone declaration",
                ));
            }
        }
        Ok(DateTimeConstraint {
            with_timezone,
            gte,
            lte,
            fmt: "%Y-%m-%dT%H:%M:%S".to_string(),
        })
    }

    pub fn naive() -> Self {
        Self::new(false, None, None).unwrap()
    }

    pub fn aware() -> Self {
        Self::new(true, None, None).unwrap()
    }

    /// Parses an ISO-8601 string. A trailing offset makes the value aware
    /// (normalized to UTC); its absence makes it naive. The `with_timezone`
    /// flag is enforced by `check`, not here.
    pub fn transform(&self, raw: &serde_json::Value) -> Result<Value, ValidationError> {
        let serde_json::Value::String(value) = raw else {
            return Err(ValidationError::incorrect_format(format!(
                "impossible to bring {raw} to datetime"
            )));
        };

        if let Ok(aware) = DateTime::parse_from_rfc3339(value) {
            return Ok(Value::DateTimeTz(aware.with_timezone(&Utc)));
        }
        let naive = value
            .parse::<NaiveDateTime>()
            .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"));
        match naive {
            Ok(naive) => Ok(Value::DateTime(naive)),
            Err(err) => Err(ValidationError::incorrect_format(format!(
                "incorrect datetime value, {err}"
            ))),
        }
    }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match (value, self.with_timezone) {
            (Value::DateTime(_), true) => {
                return Err(ValidationErrorKind::DateTimeTzAware.into());
            }
            (Value::DateTimeTz(_), false) => {
                return Err(ValidationErrorKind::DateTimeTzNaive.into());
            }
            (Value::DateTime(_) | Value::DateTimeTz(_), _) => {}
            _ => return Ok(()),
        }

        if let Some(gte) = self.gte {
            if Self::before(value, gte) {
                return Err(ValidationErrorKind::DateTimeGte {
                    bound: gte.to_value(),
                }
                .into());
            }
        }
        if let Some(lte) = self.lte {
            if Self::after(value, lte) {
                return Err(ValidationErrorKind::DateTimeLte {
                    bound: lte.to_value(),
                }
                .into());
            }
        }
        Ok(())
    }

    fn before(value: &Value, bound: DateTimeBound) -> bool {
        match (value, bound) {
            (Value::DateTime(value), DateTimeBound::Naive(bound)) => *value < bound,
            (Value::DateTimeTz(value), DateTimeBound::Utc(bound)) => *value < bound,
            _ => false,
        }
    }

    fn after(value: &Value, bound: DateTimeBound) -> bool {
        match (value, bound) {
            (Value::DateTime(value), DateTimeBound::Naive(bound)) => *value > bound,
            (Value::DateTimeTz(value), DateTimeBound::Utc(bound)) => *value > bound,
            _ => false,
        }
    }
}
