use super::Value;
use std::cmp::Ordering;

/// Ordered comparison between two values of the same variant.
///
/// Returns `None` for mixed variants, nulls, and variants without a natural
/// order (records, lists, enum members). Equality across variants is handled
/// by `PartialEq`; this is only for `<`/`<=`/`>`/`>=` evaluation.
pub fn value_partial_cmp(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::I64(a), Value::I64(b)) => a.partial_cmp(b),
        (Value::Numeric(a), Value::Numeric(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => a.partial_cmp(b),
        (Value::Date(a), Value::Date(b)) => a.partial_cmp(b),
        (Value::Time(a), Value::Time(b)) => a.partial_cmp(b),
        (Value::DateTime(a), Value::DateTime(b)) => a.partial_cmp(b),
        (Value::DateTimeTz(a), Value::DateTimeTz(b)) => a.partial_cmp(b),
        _ => None,
    }
}
