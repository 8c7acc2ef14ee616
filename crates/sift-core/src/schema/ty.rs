use std::fmt;

/// The closed set of scalar column types.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    Boolean,
    Date,
    DateTime,
    Enum,
    Guid,
    Integer,
    Numeric,
    String,
    Text,
    Time,
}

impl ScalarType {
    pub fn is_boolean(self) -> bool {
        matches!(self, Self::Boolean)
    }

    /// True for String and Text, which share coercion and operators.
    pub fn is_textual(self) -> bool {
        matches!(self, Self::String | Self::Text)
    }

    /// True for types with a natural ordering usable in range filters.
    pub fn is_ordered(self) -> bool {
        matches!(
            self,
            Self::Date | Self::DateTime | Self::Integer | Self::Numeric | Self::Time
        )
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Enum => "enum",
            Self::Guid => "guid",
            Self::Integer => "integer",
            Self::Numeric => "numeric",
            Self::String => "string",
            Self::Text => "text",
            Self::Time => "time",
        };
        f.write_str(name)
    }
}
