use crate::schema::{
    constraint::{DateTimeBound, IntWidth},
    CompositeKind,
};

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;

/// Raw description of a record type, as handed over by the mapping layer.
#[derive(Debug, Clone)]
pub struct ModelDef {
    pub namespace: String,
    pub name: String,
    pub primary_key: Vec<String>,
    pub fields: Vec<FieldDef>,

    /// Set when this model is the child-row type of another model's list;
    /// holds the owner's full name. Row models are embedded into their
    /// owner's list schema instead of appearing as top-level models.
    pub row_of: Option<String>,
}

impl ModelDef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        ModelDef {
            namespace: namespace.into(),
            name: name.into(),
            primary_key: vec![],
            fields: vec![],
            row_of: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    pub fn primary_key(mut self, keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.primary_key = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDef {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn row_of(mut self, owner: impl Into<String>) -> Self {
        self.row_of = Some(owner.into());
        self
    }
}

/// One raw field of a record type.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
}

/// The closed set of raw field kinds the dispatcher maps over.
#[derive(Debug, Clone)]
pub enum FieldKind {
    Column(ColumnDef),
    Relation(RelationDef),
    Composite(CompositeDef),
    Property(PropertyDef),
    List(ListDef),
}

/// Raw column description: concrete type plus storage flags.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub ty: ColumnTyDef,
    pub read_only: bool,
    pub hidden: bool,
    pub nullable: bool,
    pub has_default: bool,
    pub unique: bool,
}

impl ColumnDef {
    pub fn new(ty: ColumnTyDef) -> Self {
        ColumnDef {
            ty,
            read_only: false,
            hidden: false,
            nullable: false,
            has_default: false,
            unique: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }
}

/// The concrete column implementation types reflection dispatches on.
#[derive(Debug, Clone)]
pub enum ColumnTyDef {
    Boolean,
    Date {
        gte: Option<NaiveDate>,
        lte: Option<NaiveDate>,
    },
    DateTime {
        with_timezone: bool,
        gte: Option<DateTimeBound>,
        lte: Option<DateTimeBound>,
    },
    Enum {
        enum_ty: String,
    },
    Guid,
    Integer {
        width: IntWidth,
        gte: Option<i64>,
        lte: Option<i64>,
    },
    Numeric {
        precision: u32,
        scale: u32,
        gte: Option<Decimal>,
        gt: Option<Decimal>,
        lte: Option<Decimal>,
        lt: Option<Decimal>,
    },
    /// Resolves to a Text column when `max_length` is absent.
    String {
        min_length: Option<usize>,
        max_length: Option<usize>,
        pattern: Option<String>,
    },
    Time {
        gte: Option<NaiveTime>,
        lte: Option<NaiveTime>,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RelationDirection {
    /// The owning side holds the key (forward)
    ManyToOne,
    /// The target side holds the key (reverse)
    OneToMany,
}

/// Raw relation description.
#[derive(Debug, Clone)]
pub struct RelationDef {
    /// Full name of the target record type
    pub target: String,

    pub direction: RelationDirection,

    /// Reverse relations with `uselist = false` are one-to-one backsides
    pub uselist: bool,

    /// Key column on the owning side
    pub local_key: String,

    /// Key column on the target side
    pub remote_key: String,

    /// Whether the local key is unique (forward one-to-one)
    pub local_unique: bool,

    /// Explicit writability override; defaults by direction
    pub read_only: Option<bool>,
}

/// Raw composite description.
#[derive(Debug, Clone)]
pub struct CompositeDef {
    pub kind: CompositeKind,
    pub attrs: Vec<String>,
    pub nullable: bool,
}

/// Raw computed-property description.
#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub required: bool,
    pub getter: Option<AccessorDef>,
    pub setter: Option<AccessorDef>,
}

/// One side of a property; reuses the column type vocabulary.
#[derive(Debug, Clone)]
pub struct AccessorDef {
    pub ty: ColumnTyDef,
}

/// Raw child-row list description.
#[derive(Debug, Clone)]
pub struct ListDef {
    /// Full name of the row model (a `ModelDef` with `row_of` set)
    pub row_model: String,

    /// Column in the row model referencing the owner
    pub owner_key: String,

    /// Column in the row model holding the row position
    pub row_number: String,
}
