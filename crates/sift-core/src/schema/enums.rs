/// An enumeration type referenced by Enum columns.
///
/// Exported in the schema document so clients can render member choices.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EnumTy {
    /// Name of the enumeration type
    pub name: String,

    /// The underlying representation of the members
    pub repr: EnumRepr,

    /// Declared members, in declaration order
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumRepr {
    Int,
    Str,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EnumMember {
    /// Member name
    pub name: String,

    /// Underlying integer value; set when the repr is Int
    #[serde(skip_serializing_if = "Option::is_none")]
    pub int_value: Option<i64>,

    /// Underlying string value; set when the repr is Str
    #[serde(skip_serializing_if = "Option::is_none")]
    pub str_value: Option<String>,
}

impl EnumTy {
    pub fn int(name: impl Into<String>, members: impl IntoIterator<Item = (&'static str, i64)>) -> Self {
        EnumTy {
            name: name.into(),
            repr: EnumRepr::Int,
            members: members
                .into_iter()
                .map(|(name, value)| EnumMember {
                    name: name.into(),
                    int_value: Some(value),
                    str_value: None,
                })
                .collect(),
        }
    }

    pub fn str(name: impl Into<String>, members: impl IntoIterator<Item = &'static str>) -> Self {
        EnumTy {
            name: name.into(),
            repr: EnumRepr::Str,
            members: members
                .into_iter()
                .map(|name| EnumMember {
                    name: name.into(),
                    int_value: None,
                    str_value: Some(name.into()),
                })
                .collect(),
        }
    }

    pub fn member_by_name(&self, name: &str) -> Option<&EnumMember> {
        self.members.iter().find(|member| member.name == name)
    }

    pub fn member_by_int(&self, value: i64) -> Option<&EnumMember> {
        self.members
            .iter()
            .find(|member| member.int_value == Some(value))
    }

    pub fn member_by_str(&self, value: &str) -> Option<&EnumMember> {
        self.members
            .iter()
            .find(|member| member.str_value.as_deref() == Some(value))
    }
}
