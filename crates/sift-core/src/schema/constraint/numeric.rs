use crate::{
    error::{ValidationError, ValidationErrorKind},
    Error, Result, Value,
};

use rust_decimal::{Decimal, RoundingStrategy};

#[derive(Debug, Clone, serde::Serialize)]
pub struct NumericConstraint {
    /// Total significant digits the storage column accepts
    pub precision: u32,

    /// Fractional digits; every value is re-quantized to exactly this scale
    pub scale: u32,

    pub gte: Option<Decimal>,
    pub gt: Option<Decimal>,
    pub lte: Option<Decimal>,
    pub lt: Option<Decimal>,
}

impl NumericConstraint {
    pub fn new(
        precision: u32,
        scale: u32,
        gte: Option<Decimal>,
        gt: Option<Decimal>,
        lte: Option<Decimal>,
        lt: Option<Decimal>,
    ) -> Result<Self> {
        if scale > precision {
            return Err(Error::invalid_schema(format!(
                "numeric scale {scale} exceeds precision {precision}"
            )));
        }
        if gte.is_some() && gt.is_some() {
            return Err(Error::invalid_schema(
                "numeric gte and gt bounds are mutually exclusive",
            ));
        }
        if lte.is_some() && lt.is_some() {
            return Err(Error::invalid_schema(
                "numeric lte and lt bounds are mutually exclusive",
            ));
        }
        Ok(NumericConstraint {
            precision,
            scale,
            gte,
            gt,
            lte,
            lt,
        })
    }

    pub fn plain(precision: u32, scale: u32) -> Result<Self> {
        Self::new(precision, scale, None, None, None, None)
    }

    /// Re-quantizes a decimal to the declared scale, half-even.
    pub fn normalize(&self, value: Decimal) -> Decimal {
        let mut value =
            value.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointNearestEven);
        value.rescale(self.scale);
        value
    }

    pub fn transform(&self, raw: &serde_json::Value) -> Result<Value, ValidationError> {
        let value = match raw {
            serde_json::Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Decimal::from(int)
                } else if let Some(float) = number.as_f64() {
                    Decimal::try_from(float).map_err(|_| incorrect(raw))?
                } else {
                    return Err(incorrect(raw));
                }
            }
            serde_json::Value::String(string) => {
                string.parse::<Decimal>().map_err(|_| incorrect(raw))?
            }
            _ => return Err(incorrect(raw)),
        };
        Ok(Value::Numeric(self.normalize(value)))
    }

    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        let Value::Numeric(value) = value else {
            return Ok(());
        };

        self.check_size(*value)?;

        if let Some(gte) = self.gte {
            if *value < gte {
                return Err(ValidationErrorKind::NumericGte { bound: gte }.into());
            }
        }
        if let Some(lte) = self.lte {
            if *value > lte {
                return Err(ValidationErrorKind::NumericLte { bound: lte }.into());
            }
        }
        if let Some(gt) = self.gt {
            if *value <= gt {
                return Err(ValidationErrorKind::NumericGt { bound: gt }.into());
            }
        }
        if let Some(lt) = self.lt {
            if *value >= lt {
                return Err(ValidationErrorKind::NumericLt { bound: lt }.into());
            }
        }
        Ok(())
    }

    /// Oversized values are rejected, never truncated.
    fn check_size(&self, value: Decimal) -> Result<(), ValidationError> {
        if value.scale() != self.scale {
            return Err(ValidationErrorKind::NumericBigScale { scale: self.scale }.into());
        }
        let digits = value.mantissa().unsigned_abs().to_string().len() as i64;
        if (self.precision as i64) < digits - self.scale as i64 {
            return Err(ValidationErrorKind::NumericBigPrecision {
                precision: self.precision,
            }
            .into());
        }
        Ok(())
    }
}

fn incorrect(raw: &serde_json::Value) -> ValidationError {
    ValidationError::incorrect_format(format!("incorrect decimal value, {raw}"))
}
