use std::fmt;

/// Direction and cardinality of a relation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// Forward foreign key (many rows point at one target)
    Fk,
    /// Forward one-to-one (a unique foreign key)
    OneToOne,
    /// Reverse side of a foreign key
    RevFk,
    /// Reverse side of a one-to-one
    RevOneToOne,
}

impl RelationKind {
    pub fn is_forward(self) -> bool {
        matches!(self, Self::Fk | Self::OneToOne)
    }

    pub fn is_reverse(self) -> bool {
        !self.is_forward()
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fk => "fk",
            Self::OneToOne => "o2o",
            Self::RevFk => "reverse_fk",
            Self::RevOneToOne => "reverse_o2o",
        };
        f.write_str(name)
    }
}

/// Schema of a relation attribute.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RelationSchema {
    pub name: String,

    /// Full name of the owning record type
    pub owner: String,

    pub kind: RelationKind,

    /// Full name of the target record type
    pub to_model: String,

    /// Column on the owning side holding the key
    pub local_key: String,

    /// Column on the target side the key points at
    pub remote_key: String,

    /// Reverse relations are read-only unless overridden
    pub read_only: bool,
}

impl RelationSchema {
    pub fn is_forward(&self) -> bool {
        self.kind.is_forward()
    }
}
