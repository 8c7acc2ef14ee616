use super::{
    ColumnTyDef, CompositeDef, FieldDef, FieldKind, ListDef, ModelDef, PropertyDef, RelationDef,
    RelationDirection,
};
use crate::{
    schema::{
        constraint::{
            DateConstraint, DateTimeConstraint, EnumConstraint, IntegerConstraint,
            NumericConstraint, StringConstraint, TimeConstraint,
        },
        AttrSchema, ColumnSchema, CompositeSchema, Constraint, EnumTy, ListSchema, ModelSchema,
        PropertyAccessor, PropertySchema, RelationKind, RelationSchema,
    },
    Error, Result,
};

use indexmap::IndexMap;

/// Shared lookups available to generators while reflection runs.
pub struct Context<'a> {
    pub enums: &'a IndexMap<String, EnumTy>,
    pub defs: &'a IndexMap<String, ModelDef>,

    /// Row models are built before their owners so list generators can embed
    /// them.
    pub row_models: &'a IndexMap<String, ModelSchema>,
}

/// Produces the attribute schema for one raw field, or `None` to skip the
/// field entirely.
pub type Generator = fn(&Context<'_>, &ModelDef, &FieldDef) -> Result<Option<AttrSchema>>;

/// Resolves raw fields to schema generators.
///
/// Explicit `(owner, field_name)` overrides take priority and bypass the
/// kind-based mapping; the kind table itself is a closed match over
/// [`FieldKind`], fixed at startup.
#[derive(Default)]
pub struct Dispatcher {
    overrides: IndexMap<(String, String), Generator>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a per-field override. Registering the same field twice is a
    /// programming error.
    pub fn override_for(
        &mut self,
        owner: impl Into<String>,
        field: impl Into<String>,
        generator: Generator,
    ) -> Result<()> {
        let key = (owner.into(), field.into());
        if self.overrides.contains_key(&key) {
            return Err(Error::invalid_schema(format!(
                "generator for `{}.{}` is already registered",
                key.0, key.1
            )));
        }
        self.overrides.insert(key, generator);
        Ok(())
    }

    pub fn dispatch(
        &self,
        cx: &Context<'_>,
        model: &ModelDef,
        field: &FieldDef,
    ) -> Result<Option<AttrSchema>> {
        let generator = self
            .overrides
            .get(&(model.full_name(), field.name.clone()))
            .copied()
            .unwrap_or_else(|| default_generator(&field.kind));
        generator(cx, model, field)
    }
}

fn default_generator(kind: &FieldKind) -> Generator {
    match kind {
        FieldKind::Column(_) => generate_column,
        FieldKind::Relation(_) => generate_relation,
        FieldKind::Composite(_) => generate_composite,
        FieldKind::Property(_) => generate_property,
        FieldKind::List(_) => generate_list,
    }
}

/// Builds the constraint for a raw column type, resolving enum references
/// through the registry.
pub(super) fn constraint_for(cx: &Context<'_>, ty: &ColumnTyDef) -> Result<Constraint> {
    Ok(match ty {
        ColumnTyDef::Boolean => Constraint::Boolean,
        ColumnTyDef::Date { gte, lte } => Constraint::Date(DateConstraint::bounded(*gte, *lte)),
        ColumnTyDef::DateTime {
            with_timezone,
            gte,
            lte,
        } => Constraint::DateTime(DateTimeConstraint::new(*with_timezone, *gte, *lte)?),
        ColumnTyDef::Enum { enum_ty } => {
            let ty = cx.enums.get(enum_ty).ok_or_else(|| {
                Error::invalid_schema(format!("unknown enum type `{enum_ty}`"))
            })?;
            Constraint::Enum(EnumConstraint::new(ty.clone()))
        }
        ColumnTyDef::Guid => Constraint::Guid,
        ColumnTyDef::Integer { width, gte, lte } => {
            Constraint::Integer(IntegerConstraint::new(*width, *gte, *lte)?)
        }
        ColumnTyDef::Numeric {
            precision,
            scale,
            gte,
            gt,
            lte,
            lt,
        } => Constraint::Numeric(NumericConstraint::new(*precision, *scale, *gte, *gt, *lte, *lt)?),
        ColumnTyDef::String {
            min_length,
            max_length,
            pattern,
        } => Constraint::String(StringConstraint::new(
            *min_length,
            *max_length,
            pattern.as_deref(),
        )?),
        ColumnTyDef::Time { gte, lte } => Constraint::Time(TimeConstraint::bounded(*gte, *lte)),
    })
}

fn generate_column(
    cx: &Context<'_>,
    model: &ModelDef,
    field: &FieldDef,
) -> Result<Option<AttrSchema>> {
    let FieldKind::Column(def) = &field.kind else {
        return Err(Error::invalid_schema(format!(
            "`{}.{}` is not a column",
            model.full_name(),
            field.name
        )));
    };
    let constraint = constraint_for(cx, &def.ty)?;
    let mut column = ColumnSchema::new(&field.name, model.full_name(), constraint);
    column.read_only = def.read_only;
    column.hidden = def.hidden;
    column.nullable = def.nullable;
    column.has_default = def.has_default;
    column.unique = def.unique;
    Ok(Some(AttrSchema::Column(column)))
}

fn generate_relation(
    cx: &Context<'_>,
    model: &ModelDef,
    field: &FieldDef,
) -> Result<Option<AttrSchema>> {
    let FieldKind::Relation(def) = &field.kind else {
        return Err(Error::invalid_schema(format!(
            "`{}.{}` is not a relation",
            model.full_name(),
            field.name
        )));
    };

    let kind = match resolve_relation_kind(cx, model, def) {
        Some(kind) => kind,
        // Structural artifacts of list ownership are not plain relations.
        None => return Ok(None),
    };

    let read_only = def.read_only.unwrap_or(kind.is_reverse());
    Ok(Some(AttrSchema::Relation(RelationSchema {
        name: field.name.clone(),
        owner: model.full_name(),
        kind,
        to_model: def.target.clone(),
        local_key: def.local_key.clone(),
        remote_key: def.remote_key.clone(),
        read_only,
    })))
}

fn resolve_relation_kind(
    cx: &Context<'_>,
    model: &ModelDef,
    def: &RelationDef,
) -> Option<RelationKind> {
    match def.direction {
        RelationDirection::OneToMany => {
            if def.uselist {
                // The reverse side of a list/owner relationship is
                // represented structurally by the owner's list attribute.
                let target_is_row = cx
                    .defs
                    .get(&def.target)
                    .is_some_and(|target| target.row_of.is_some());
                if target_is_row {
                    return None;
                }
                Some(RelationKind::RevFk)
            } else {
                Some(RelationKind::RevOneToOne)
            }
        }
        RelationDirection::ManyToOne => {
            // A row model's back-reference to its owner is part of the list
            // structure, not a relation attribute.
            if model.row_of.as_deref() == Some(def.target.as_str()) {
                return None;
            }
            if def.local_unique {
                Some(RelationKind::OneToOne)
            } else {
                Some(RelationKind::Fk)
            }
        }
    }
}

fn generate_composite(
    _cx: &Context<'_>,
    model: &ModelDef,
    field: &FieldDef,
) -> Result<Option<AttrSchema>> {
    let FieldKind::Composite(def) = &field.kind else {
        return Err(Error::invalid_schema(format!(
            "`{}.{}` is not a composite",
            model.full_name(),
            field.name
        )));
    };
    let CompositeDef {
        kind,
        attrs,
        nullable,
    } = def;
    Ok(Some(AttrSchema::Composite(CompositeSchema {
        name: field.name.clone(),
        owner: model.full_name(),
        kind: *kind,
        attrs: attrs.clone(),
        nullable: *nullable,
    })))
}

fn generate_property(
    cx: &Context<'_>,
    model: &ModelDef,
    field: &FieldDef,
) -> Result<Option<AttrSchema>> {
    let FieldKind::Property(def) = &field.kind else {
        return Err(Error::invalid_schema(format!(
            "`{}.{}` is not a property",
            model.full_name(),
            field.name
        )));
    };
    let PropertyDef {
        required,
        getter,
        setter,
    } = def;
    let accessor = |def: &super::AccessorDef| -> Result<PropertyAccessor> {
        Ok(PropertyAccessor::new(constraint_for(cx, &def.ty)?))
    };
    Ok(Some(AttrSchema::Property(PropertySchema {
        name: field.name.clone(),
        owner: model.full_name(),
        required: *required,
        getter: getter.as_ref().map(&accessor).transpose()?,
        setter: setter.as_ref().map(&accessor).transpose()?,
    })))
}

fn generate_list(
    cx: &Context<'_>,
    model: &ModelDef,
    field: &FieldDef,
) -> Result<Option<AttrSchema>> {
    let FieldKind::List(def) = &field.kind else {
        return Err(Error::invalid_schema(format!(
            "`{}.{}` is not a list",
            model.full_name(),
            field.name
        )));
    };
    let ListDef {
        row_model,
        owner_key,
        row_number,
    } = def;
    let row = cx.row_models.get(row_model).ok_or_else(|| {
        Error::invalid_schema(format!(
            "`{}.{}` references unknown row model `{row_model}`",
            model.full_name(),
            field.name
        ))
    })?;
    Ok(Some(AttrSchema::List(ListSchema {
        name: field.name.clone(),
        owner: model.full_name(),
        row_model: row.clone(),
        owner_key: owner_key.clone(),
        row_number: row_number.clone(),
    })))
}
