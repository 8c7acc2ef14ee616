/// The closed set of composite kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeKind {
    /// Mutually exclusive member columns presented as one logical attribute
    OneOf,
}

/// Schema of a composite attribute.
///
/// Invariant: at most one member column holds a non-null value at a time;
/// setting one clears the previously-set member.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CompositeSchema {
    pub name: String,

    /// Full name of the owning record type
    pub owner: String,

    pub kind: CompositeKind,

    /// Member column names, in declaration order
    pub attrs: Vec<String>,

    /// Whether "no member set" is an acceptable state
    pub nullable: bool,
}

impl CompositeSchema {
    pub fn one_of(
        name: impl Into<String>,
        owner: impl Into<String>,
        attrs: impl IntoIterator<Item = impl Into<String>>,
        nullable: bool,
    ) -> Self {
        CompositeSchema {
            name: name.into(),
            owner: owner.into(),
            kind: CompositeKind::OneOf,
            attrs: attrs.into_iter().map(Into::into).collect(),
            nullable,
        }
    }

    pub fn is_member(&self, name: &str) -> bool {
        self.attrs.iter().any(|attr| attr == name)
    }
}
