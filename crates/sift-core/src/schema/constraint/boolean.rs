use crate::{error::ValidationError, Value};

const TRUTHY: &[&str] = &["1", "on", "t", "true", "y", "yes"];
const FALSY: &[&str] = &["0", "off", "f", "false", "n", "no"];

pub(super) fn transform(raw: &serde_json::Value) -> Result<Value, ValidationError> {
    match raw {
        serde_json::Value::Bool(value) => Ok(Value::Bool(*value)),
        serde_json::Value::Number(value) => match value.as_i64() {
            Some(1) => Ok(Value::Bool(true)),
            Some(0) => Ok(Value::Bool(false)),
            _ => Err(incorrect(raw)),
        },
        serde_json::Value::String(value) => {
            if TRUTHY.contains(&value.as_str()) {
                Ok(Value::Bool(true))
            } else if FALSY.contains(&value.as_str()) {
                Ok(Value::Bool(false))
            } else {
                Err(incorrect(raw))
            }
        }
        _ => Err(incorrect(raw)),
    }
}

fn incorrect(raw: &serde_json::Value) -> ValidationError {
    ValidationError::incorrect_format(format!("impossible to bring {raw} to bool"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_truthy_and_falsy_tokens() {
        for token in ["1", "on", "t", "true", "y", "yes"] {
            assert_eq!(transform(&token.into()).unwrap(), Value::Bool(true));
        }
        for token in ["0", "off", "f", "false", "n", "no"] {
            assert_eq!(transform(&token.into()).unwrap(), Value::Bool(false));
        }
    }

    #[test]
    fn rejects_other_tokens() {
        assert!(transform(&"maybe".into()).is_err());
        assert!(transform(&serde_json::json!(2)).is_err());
    }
}
