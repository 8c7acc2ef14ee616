use super::{dispatch::Context, Dispatcher, Generator, ModelDef};
use crate::{
    schema::{AttrSchema, EnumTy, ModelSchema},
    Error, Result, Schema,
};

use indexmap::IndexMap;

/// Assembles a [`Schema`] from raw model definitions.
///
/// Row models (list child rows) are built first so owners can embed them;
/// a verification pass then cross-checks relation targets, key columns,
/// primary keys, and composite member claims.
#[derive(Default)]
pub struct Builder {
    dispatcher: Dispatcher,
    overrides: Vec<(String, String, Generator)>,
    enums: Vec<EnumTy>,
    models: Vec<ModelDef>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enum_ty(mut self, ty: EnumTy) -> Self {
        self.enums.push(ty);
        self
    }

    pub fn model(mut self, def: ModelDef) -> Self {
        self.models.push(def);
        self
    }

    /// Registers a per-field generator override, bypassing the kind-based
    /// mapping for that field.
    pub fn override_for(
        mut self,
        owner: impl Into<String>,
        field: impl Into<String>,
        generator: Generator,
    ) -> Self {
        self.overrides.push((owner.into(), field.into(), generator));
        self
    }

    pub fn build(mut self) -> Result<Schema> {
        for (owner, field, generator) in std::mem::take(&mut self.overrides) {
            self.dispatcher.override_for(owner, field, generator)?;
        }

        let mut enums = IndexMap::new();
        for ty in &self.enums {
            if enums.insert(ty.name.clone(), ty.clone()).is_some() {
                return Err(Error::invalid_schema(format!(
                    "enum type `{}` is declared twice",
                    ty.name
                )));
            }
        }

        let mut defs = IndexMap::new();
        for def in &self.models {
            if defs.insert(def.full_name(), def.clone()).is_some() {
                return Err(Error::invalid_schema(format!(
                    "model `{}` is declared twice",
                    def.full_name()
                )));
            }
        }

        // Row models first: owners embed them into their list schemas.
        let mut row_models = IndexMap::new();
        for def in defs.values().filter(|def| def.row_of.is_some()) {
            let cx = Context {
                enums: &enums,
                defs: &defs,
                row_models: &row_models,
            };
            let schema = self.build_model(&cx, def)?;
            if schema.lists().next().is_some() {
                return Err(Error::invalid_schema(format!(
                    "row model `{}` must not contain nested lists",
                    def.full_name()
                )));
            }
            row_models.insert(def.full_name(), schema);
        }

        let mut models = IndexMap::new();
        for def in defs.values().filter(|def| def.row_of.is_none()) {
            let cx = Context {
                enums: &enums,
                defs: &defs,
                row_models: &row_models,
            };
            let schema = self.build_model(&cx, def)?;
            models.insert(def.full_name(), schema);
        }

        let schema = Schema { models, enums };
        verify(&schema)?;
        Ok(schema)
    }

    fn build_model(&self, cx: &Context<'_>, def: &ModelDef) -> Result<ModelSchema> {
        let mut attrs: IndexMap<String, AttrSchema> = IndexMap::new();
        for field in &def.fields {
            let Some(attr) = self.dispatcher.dispatch(cx, def, field)? else {
                continue;
            };
            if attrs.insert(field.name.clone(), attr).is_some() {
                return Err(Error::invalid_schema(format!(
                    "attribute `{}.{}` is declared twice",
                    def.full_name(),
                    field.name
                )));
            }
        }
        Ok(ModelSchema {
            namespace: def.namespace.clone(),
            name: def.name.clone(),
            primary_key: def.primary_key.clone(),
            attrs,
        })
    }
}

fn verify(schema: &Schema) -> Result<()> {
    for model in schema.models() {
        verify_model(schema, model)?;
        for list in model.lists() {
            verify_row_model(&list.row_model, list)?;
        }
    }
    Ok(())
}

fn verify_model(schema: &Schema, model: &ModelSchema) -> Result<()> {
    let full_name = model.full_name();

    for pk in &model.primary_key {
        if model.attr(pk).and_then(AttrSchema::as_column).is_none() {
            return Err(Error::invalid_schema(format!(
                "primary key `{full_name}.{pk}` is not a column"
            )));
        }
    }

    for relation in model.relations() {
        let Some(target) = schema.get_model(&relation.to_model) else {
            return Err(Error::invalid_schema(format!(
                "relation `{full_name}.{}` references a model that was not registered \
                 with the schema; did you forget to add it to the builder?",
                relation.name
            )));
        };
        if relation.is_forward()
            && model
                .attr(&relation.local_key)
                .and_then(AttrSchema::as_column)
                .is_none()
        {
            return Err(Error::invalid_schema(format!(
                "relation `{full_name}.{}` names local key `{}`, which is not a column",
                relation.name, relation.local_key
            )));
        }
        if relation.is_forward()
            && target
                .attr(&relation.remote_key)
                .and_then(AttrSchema::as_column)
                .is_none()
        {
            return Err(Error::invalid_schema(format!(
                "relation `{full_name}.{}` names remote key `{}`, which is not a column \
                 of `{}`",
                relation.name, relation.remote_key, relation.to_model
            )));
        }
    }

    verify_composites(model)?;
    Ok(())
}

fn verify_composites(model: &ModelSchema) -> Result<()> {
    let full_name = model.full_name();
    let mut claimed: IndexMap<&str, &str> = IndexMap::new();

    for composite in model.composites() {
        for member in &composite.attrs {
            if model.attr(member).and_then(AttrSchema::as_column).is_none() {
                return Err(Error::invalid_schema(format!(
                    "composite `{full_name}.{}` claims `{member}`, which is not a column",
                    composite.name
                )));
            }
            if let Some(previous) = claimed.insert(member, &composite.name) {
                return Err(Error::invalid_schema(format!(
                    "column `{full_name}.{member}` is claimed by both `{previous}` and `{}`",
                    composite.name
                )));
            }
        }
    }
    Ok(())
}

fn verify_row_model(row: &ModelSchema, list: &crate::schema::ListSchema) -> Result<()> {
    let full_name = row.full_name();
    for key in [&list.owner_key, &list.row_number] {
        if row.attr(key).and_then(AttrSchema::as_column).is_none() {
            return Err(Error::invalid_schema(format!(
                "list `{}` names `{key}`, which is not a column of row model `{full_name}`",
                list.name
            )));
        }
    }
    verify_composites(row)
}
