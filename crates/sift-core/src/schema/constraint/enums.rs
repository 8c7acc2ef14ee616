use crate::{
    error::ValidationError,
    schema::{EnumRepr, EnumTy},
    value::ValueEnum,
    Value,
};

/// Constraint for Enum columns.
///
/// Carries the resolved enumeration so coercion needs no registry access;
/// the schema still lists the type in its enum registry for the document
/// export.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EnumConstraint {
    pub ty: EnumTy,
}

impl EnumConstraint {
    pub fn new(ty: EnumTy) -> Self {
        EnumConstraint { ty }
    }

    /// Accepts a member's underlying representation: the int value for
    /// int-backed enums, the string value for string-backed ones. String
    /// input for an int-backed enum is parsed first.
    pub fn transform(&self, raw: &serde_json::Value) -> Result<Value, ValidationError> {
        let member = match (self.ty.repr, raw) {
            (EnumRepr::Int, serde_json::Value::Number(number)) => number
                .as_i64()
                .and_then(|value| self.ty.member_by_int(value)),
            (EnumRepr::Int, serde_json::Value::String(string)) => string
                .parse::<i64>()
                .ok()
                .and_then(|value| self.ty.member_by_int(value)),
            (EnumRepr::Str, serde_json::Value::String(string)) => self.ty.member_by_str(string),
            (EnumRepr::Str, serde_json::Value::Number(number)) => {
                self.ty.member_by_str(&number.to_string())
            }
            _ => None,
        };

        match member {
            Some(member) => Ok(Value::Enum(ValueEnum {
                ty: self.ty.name.clone(),
                member: member.name.clone(),
            })),
            None => Err(ValidationError::incorrect_format(format!(
                "{raw} is not a member of {}",
                self.ty.name
            ))),
        }
    }

    /// Membership is established during coercion; a coerced value re-checked
    /// here only needs to belong to the right enumeration.
    pub fn check(&self, value: &Value) -> Result<(), ValidationError> {
        match value {
            Value::Enum(value) if value.ty != self.ty.name => {
                Err(ValidationError::incorrect_format(format!(
                    "{} is not a member of {}",
                    value.member, self.ty.name
                )))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> EnumConstraint {
        EnumConstraint::new(EnumTy::str("Color", ["red", "green", "blue"]))
    }

    fn priority() -> EnumConstraint {
        EnumConstraint::new(EnumTy::int("Priority", [("low", 1), ("high", 2)]))
    }

    #[test]
    fn str_enum_accepts_member_value() {
        let value = color().transform(&"green".into()).unwrap();
        assert_eq!(
            value,
            Value::Enum(ValueEnum {
                ty: "Color".into(),
                member: "green".into()
            })
        );
    }

    #[test]
    fn int_enum_accepts_underlying_int_and_numeric_string() {
        for raw in [serde_json::json!(2), serde_json::json!("2")] {
            let value = priority().transform(&raw).unwrap();
            assert_eq!(
                value,
                Value::Enum(ValueEnum {
                    ty: "Priority".into(),
                    member: "high".into()
                })
            );
        }
    }

    #[test]
    fn unknown_member_is_a_coercion_error() {
        assert!(color().transform(&"magenta".into()).is_err());
        assert!(priority().transform(&serde_json::json!(9)).is_err());
    }
}
