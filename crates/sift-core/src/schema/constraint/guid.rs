use crate::{error::ValidationError, Value};

use uuid::Uuid;

/// Guids coerce from their canonical string form only.
pub(super) fn transform(raw: &serde_json::Value) -> Result<Value, ValidationError> {
    match raw {
        serde_json::Value::String(value) => match Uuid::parse_str(value) {
            Ok(uuid) => Ok(Value::Uuid(uuid)),
            Err(err) => Err(ValidationError::incorrect_format(format!(
                "incorrect guid value, {err}"
            ))),
        },
        _ => Err(ValidationError::incorrect_format(format!(
            "impossible to bring {raw} to guid"
        ))),
    }
}
