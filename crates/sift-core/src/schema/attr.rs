use super::{ColumnSchema, CompositeSchema, ListSchema, PropertySchema, RelationSchema};

use std::fmt;

/// One named attribute of a record type.
#[derive(Clone, serde::Serialize)]
#[serde(tag = "attr", rename_all = "snake_case")]
pub enum AttrSchema {
    Column(ColumnSchema),
    Relation(RelationSchema),
    Composite(CompositeSchema),
    Property(PropertySchema),
    List(ListSchema),
}

impl AttrSchema {
    pub fn name(&self) -> &str {
        match self {
            Self::Column(column) => &column.name,
            Self::Relation(relation) => &relation.name,
            Self::Composite(composite) => &composite.name,
            Self::Property(property) => &property.name,
            Self::List(list) => &list.name,
        }
    }

    pub fn owner(&self) -> &str {
        match self {
            Self::Column(column) => &column.owner,
            Self::Relation(relation) => &relation.owner,
            Self::Composite(composite) => &composite.owner,
            Self::Property(property) => &property.owner,
            Self::List(list) => &list.owner,
        }
    }

    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column(..))
    }

    pub fn as_column(&self) -> Option<&ColumnSchema> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_column(&self) -> &ColumnSchema {
        match self {
            Self::Column(column) => column,
            _ => panic!("expected column attribute, but was {self:?}"),
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation(..))
    }

    pub fn as_relation(&self) -> Option<&RelationSchema> {
        match self {
            Self::Relation(relation) => Some(relation),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_relation(&self) -> &RelationSchema {
        match self {
            Self::Relation(relation) => relation,
            _ => panic!("expected relation attribute, but was {self:?}"),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(..))
    }

    pub fn as_composite(&self) -> Option<&CompositeSchema> {
        match self {
            Self::Composite(composite) => Some(composite),
            _ => None,
        }
    }

    pub fn is_property(&self) -> bool {
        matches!(self, Self::Property(..))
    }

    pub fn as_property(&self) -> Option<&PropertySchema> {
        match self {
            Self::Property(property) => Some(property),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(..))
    }

    pub fn as_list(&self) -> Option<&ListSchema> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }
}

impl fmt::Debug for AttrSchema {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(attr) => attr.fmt(fmt),
            Self::Relation(attr) => attr.fmt(fmt),
            Self::Composite(attr) => attr.fmt(fmt),
            Self::Property(attr) => attr.fmt(fmt),
            Self::List(attr) => attr.fmt(fmt),
        }
    }
}
