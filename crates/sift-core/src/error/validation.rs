use crate::value::Value;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde_json::json;

/// A single per-field validation failure.
///
/// Unlike [`crate::Error`], this is data, not a fault: validators collect
/// these into [`super::ObjectErrors`] so a caller sees every problem in one
/// round trip. Each kind carries the violated bound.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    kind: ValidationErrorKind,

    /// Name of the member attribute the failure belongs to, when the error
    /// is re-raised from inside a composite.
    attr: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationErrorKind {
    /// A supplied key is not an available attribute
    UnexpectedAttr,

    /// A required attribute is missing on creation
    RequiredAttr,

    /// Explicit null supplied for a non-nullable attribute
    NonNullable,

    /// Uniqueness violation reported by the repository
    NotUnique,

    /// A referenced related row does not exist
    NotFound,

    /// Input could not be parsed into the attribute's value type
    IncorrectFormat { detail: String },

    DateGte { bound: NaiveDate },
    DateLte { bound: NaiveDate },

    DateTimeGte { bound: Value },
    DateTimeLte { bound: Value },
    DateTimeTzAware,
    DateTimeTzNaive,

    IntegerGte { bound: i64 },
    IntegerLte { bound: i64 },

    NumericGte { bound: Decimal },
    NumericGt { bound: Decimal },
    NumericLte { bound: Decimal },
    NumericLt { bound: Decimal },
    NumericBigScale { scale: u32 },
    NumericBigPrecision { precision: u32 },

    StringMinLength { bound: usize },
    StringMaxLength { bound: usize },
    StringPattern,

    TimeGte { bound: NaiveTime },
    TimeLte { bound: NaiveTime },
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind) -> Self {
        ValidationError { kind, attr: None }
    }

    pub fn unexpected_attr() -> Self {
        Self::new(ValidationErrorKind::UnexpectedAttr)
    }

    pub fn required_attr() -> Self {
        Self::new(ValidationErrorKind::RequiredAttr)
    }

    pub fn non_nullable() -> Self {
        Self::new(ValidationErrorKind::NonNullable)
    }

    pub fn not_unique() -> Self {
        Self::new(ValidationErrorKind::NotUnique)
    }

    pub fn not_found() -> Self {
        Self::new(ValidationErrorKind::NotFound)
    }

    pub fn incorrect_format(detail: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::IncorrectFormat {
            detail: detail.into(),
        })
    }

    /// Attaches the offending member name, preserving the path to a failure
    /// raised from inside a composite.
    pub fn with_attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = Some(attr.into());
        self
    }

    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }

    /// Stable machine-readable code for the error export.
    pub fn code(&self) -> &'static str {
        use ValidationErrorKind::*;

        match &self.kind {
            UnexpectedAttr => "unexpected_attr",
            RequiredAttr => "required_attr",
            NonNullable => "non_nullable",
            NotUnique => "non_unique",
            NotFound => "not_found",
            IncorrectFormat { .. } => "incorrect_format",
            DateGte { .. } => "columns.date.gte",
            DateLte { .. } => "columns.date.lte",
            DateTimeGte { .. } => "columns.datetime.gte",
            DateTimeLte { .. } => "columns.datetime.lte",
            DateTimeTzAware => "columns.datetime.tz_aware",
            DateTimeTzNaive => "columns.datetime.tz_naive",
            IntegerGte { .. } => "columns.integer.gte",
            IntegerLte { .. } => "columns.integer.lte",
            NumericGte { .. } => "columns.numeric.gte",
            NumericGt { .. } => "columns.numeric.gt",
            NumericLte { .. } => "columns.numeric.lte",
            NumericLt { .. } => "columns.numeric.lt",
            NumericBigScale { .. } => "columns.numeric.big_scale",
            NumericBigPrecision { .. } => "columns.numeric.big_precision",
            StringMinLength { .. } => "columns.string.min_length",
            StringMaxLength { .. } => "columns.string.max_length",
            StringPattern => "columns.string.incorrect_pattern",
            TimeGte { .. } => "columns.time.gte",
            TimeLte { .. } => "columns.time.lte",
        }
    }

    /// Exports to the JSON leaf shape: `{"code": ..., "params": {...}}`.
    pub fn export(&self) -> serde_json::Value {
        use ValidationErrorKind::*;

        let mut params = serde_json::Map::new();
        match &self.kind {
            IncorrectFormat { detail } => {
                params.insert("detail".into(), json!(detail));
            }
            DateGte { bound } | DateLte { bound } => {
                params.insert("value".into(), json!(bound));
            }
            DateTimeGte { bound } | DateTimeLte { bound } => {
                params.insert("value".into(), json!(bound));
            }
            IntegerGte { bound } | IntegerLte { bound } => {
                params.insert("value".into(), json!(bound));
            }
            NumericGte { bound } | NumericGt { bound } | NumericLte { bound }
            | NumericLt { bound } => {
                params.insert("value".into(), json!(bound));
            }
            NumericBigScale { scale } => {
                params.insert("value".into(), json!(scale));
            }
            NumericBigPrecision { precision } => {
                params.insert("value".into(), json!(precision));
            }
            StringMinLength { bound } | StringMaxLength { bound } => {
                params.insert("value".into(), json!(bound));
            }
            TimeGte { bound } | TimeLte { bound } => {
                params.insert("value".into(), json!(bound));
            }
            _ => {}
        }
        if let Some(attr) = &self.attr {
            params.insert("attr".into(), json!(attr));
        }

        json!({ "code": self.code(), "params": params })
    }
}

impl From<ValidationErrorKind> for ValidationError {
    fn from(kind: ValidationErrorKind) -> Self {
        ValidationError::new(kind)
    }
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.code())?;
        if let Some(attr) = &self.attr {
            write!(f, " (attr: {attr})")?;
        }
        Ok(())
    }
}
