/// Three-state input for partial (bulk) updates.
///
/// "No value supplied" is distinct from an explicit null: a patch row that
/// omits a column leaves it untouched, while `null` actively clears it.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// The caller did not mention the attribute
    Unset,

    /// The caller explicitly supplied null
    Null,

    /// The caller supplied a value
    Value(serde_json::Value),
}

impl Input {
    /// Reads an attribute from a data map, distinguishing absence from null.
    pub fn from_map(map: &serde_json::Map<String, serde_json::Value>, key: &str) -> Self {
        match map.get(key) {
            None => Input::Unset,
            Some(serde_json::Value::Null) => Input::Null,
            Some(value) => Input::Value(value.clone()),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Input::Unset)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Input::Null)
    }

    /// The raw JSON this input stands for; unset has none.
    pub fn as_json(&self) -> Option<serde_json::Value> {
        match self {
            Input::Unset => None,
            Input::Null => Some(serde_json::Value::Null),
            Input::Value(value) => Some(value.clone()),
        }
    }
}
