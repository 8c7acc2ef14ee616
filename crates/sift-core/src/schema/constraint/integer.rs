use crate::{
    error::{ValidationError, ValidationErrorKind},
    Error, Result, Value,
};

/// Storage width of an integer column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IntWidth {
    I16,
    I32,
    I64,
}

impl IntWidth {
    pub const fn min(self) -> i64 {
        match self {
            Self::I16 => i16::MIN as i64,
            Self::I32 => i32::MIN as i64,
            Self::I64 => i64::MIN,
        }
    }

    pub const fn max(self) -> i64 {
        match self {
            Self::I16 => i16::MAX as i64,
            Self::I32 => i32::MAX as i64,
            Self::I64 => i64::MAX,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct IntegerConstraint {
    pub width: IntWidth,
    gte: Option<i64>,
    lte: Option<i64>,
}

impl IntegerConstraint {
    /// Builds the constraint, validating that explicit bounds sit strictly
    /// inside the width's signed range and leave at least two valid values.
    pub fn new(width: IntWidth, gte: Option<i64>, lte: Option<i64>) -> Result<Self> {
        if let Some(gte) = gte {
            if gte <= width.min() || gte >= width.max() {
                return Err(Error::invalid_schema(format!(
                    "integer gte bound {gte} is outside the {width:?} range"
                )));
            }
        }
        if let Some(lte) = lte {
            if lte <= width.min() || lte >= width.max() {
                return Err(Error::invalid_schema(format!(
                    "integer lte bound {lte} is outside the {width:?} range"
                )));
            }
        }
        if let (Some(gte), Some(lte)) = (gte, lte) {
            if lte - gte < 1 {
                return Err(Error::invalid_schema(format!(
                    "integer bounds [{gte}, {lte}] leave fewer than two values"
                )));
            }
        }
        Ok(IntegerConstraint { width, gte, lte })
    }

    pub fn unbounded(width: IntWidth) -> Self {
        IntegerConstraint {
            width,
            gte: None,
            lte: None,
        }
    }

    pub fn positive(width: IntWidth) -> Self {
        IntegerConstraint {
            width,
            gte: Some(1),
            lte: None,
        }
    }

    pub fn non_negative(width: IntWidth) -> Self {
        IntegerConstraint {
            width,
            gte: Some(0),
            lte: None,
        }
    }

    pub fn negative(width: IntWidth) -> Self {
        IntegerConstraint {
            width,
            gte: None,
            lte: Some(-1),
        }
    }

    pub fn non_positive(width: IntWidth) -> Self {
        IntegerConstraint {
            width,
            gte: None,
            lte: Some(0),
        }
    }

    /// Lower bound, defaulting to the width's minimum.
    pub fn gte(&self) -> i64 {
        self.gte.unwrap_or(self.width.min())
    }

    /// Upper bound, defaulting to the width's maximum.
    pub fn lte(&self) -> i64 {
        self.lte.unwrap_or(self.width.max())
    }

    pub fn transform(&self, raw: &serde_json::Value) -> Result<Value, ValidationError> {
        match raw {
            serde_json::Value::Number(value) => match value.as_i64() {
                Some(value) => Ok(Value::I64(value)),
                None => Err(incorrect(raw)),
            },
            serde_json::Value::String(value) => match value.parse::<i64>() {
                Ok(value) => Ok(Value::I64(value)),
                Err(_) => Err(incorrect(raw)),
            },
            _ => Err(incorrect(raw)),
        }
    }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let Value::I64(value) = value else {
            return Ok(());
        };
        if *value < self.gte() {
            return Err(ValidationErrorKind::IntegerGte { bound: self.gte() }.into());
        }
        if *value > self.lte() {
            return Err(ValidationErrorKind::IntegerLte { bound: self.lte() }.into());
        }
        Ok(())
    }
}

fn incorrect(raw: &serde_json::Value) -> ValidationError {
    ValidationError::incorrect_format(format!("impossible to bring {raw} to integer"))
}
