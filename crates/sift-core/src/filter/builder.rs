use super::{
    clause::clause_kind, Clause, ClauseGroup, ClauseKind, ClauseNode, FilterOp, GroupKind,
};
use crate::{
    schema::{AttrSchema, ColumnSchema, ModelSchema},
    Error, Result, Schema, Value,
};

/// Compiles a nested filter mapping into a typed clause tree.
pub struct FilterBuilder<'a> {
    schema: &'a Schema,
    model: &'a ModelSchema,
}

impl<'a> FilterBuilder<'a> {
    pub fn new(schema: &'a Schema, model: &'a ModelSchema) -> Self {
        FilterBuilder { schema, model }
    }

    /// Builds the clause tree. Top-level entries combine as a conjunction,
    /// matching how the storage layer applies a list of predicates.
    pub fn build(&self, filters: &serde_json::Map<String, serde_json::Value>) -> Result<Vec<ClauseNode>> {
        self.build_nodes(filters)
    }

    fn build_nodes(
        &self,
        filters: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<Vec<ClauseNode>> {
        let mut nodes = Vec::with_capacity(filters.len());
        for (key, value) in filters {
            if key.starts_with('[') {
                nodes.push(ClauseNode::Group(self.build_group(key, value)?));
            } else {
                nodes.push(ClauseNode::Clause(self.build_clause(key, value)?));
            }
        }
        Ok(nodes)
    }

    fn build_group(&self, tag: &str, body: &serde_json::Value) -> Result<ClauseGroup> {
        let Some(kind) = GroupKind::from_tag(tag) else {
            return Err(Error::invalid_filter(format!("unknown group tag `{tag}`")));
        };
        let Some(body) = body.as_object() else {
            return Err(Error::invalid_filter(format!(
                "group `{tag}` body must be a mapping"
            )));
        };
        let children = self.build_nodes(body)?;
        if children.is_empty() {
            return Err(Error::invalid_filter(format!("group `{tag}` is empty")));
        }
        Ok(ClauseGroup { kind, children })
    }

    fn build_clause(&self, key: &str, value: &serde_json::Value) -> Result<Clause> {
        let (op, operand) = split_op_and_value(key, value)?;

        // Walk dotted segments; every segment but the last switches the
        // active schema to the relation's target model.
        let mut model = self.model;
        let segments: Vec<&str> = key.split('.').collect();
        let (last, traversal) = segments.split_last().unwrap();

        for segment in traversal {
            let Some(attr) = model.attr(segment) else {
                return Err(self.unknown_attr(model, segment));
            };
            let Some(relation) = attr.as_relation() else {
                return Err(Error::invalid_filter(format!(
                    "`{}.{segment}` is not a relation and cannot be traversed",
                    model.full_name()
                )));
            };
            model = self.schema.get_model(&relation.to_model).ok_or_else(|| {
                Error::invalid_filter(format!(
                    "`{}.{segment}` targets unknown model `{}`",
                    model.full_name(),
                    relation.to_model
                ))
            })?;
        }

        let column = self.resolve_column(model, last)?;
        let Some(kind) = clause_kind(column.ty, op) else {
            return Err(Error::invalid_filter(format!(
                "operator `{op}` is not registered for {} column `{}`",
                column.ty, column.name
            )));
        };

        let value = self.coerce_operand(column, kind, operand)?;
        Ok(Clause {
            path: segments.iter().map(|s| s.to_string()).collect(),
            ty: column.ty,
            kind,
            value,
        })
    }

    /// The final path segment must be a column; a forward relation resolves
    /// to its local-key column so callers can compare stored keys directly.
    fn resolve_column<'m>(&self, model: &'m ModelSchema, name: &str) -> Result<&'m ColumnSchema> {
        match model.attr(name) {
            Some(AttrSchema::Column(column)) => Ok(column),
            Some(AttrSchema::Relation(relation)) if relation.is_forward() => model
                .attr(&relation.local_key)
                .and_then(AttrSchema::as_column)
                .ok_or_else(|| {
                    Error::invalid_filter(format!(
                        "relation `{}.{name}` has no local key column",
                        model.full_name()
                    ))
                }),
            Some(_) => Err(Error::invalid_filter(format!(
                "`{}.{name}` cannot be used in a comparison",
                model.full_name()
            ))),
            None => Err(self.unknown_attr(model, name)),
        }
    }

    fn coerce_operand(
        &self,
        column: &ColumnSchema,
        kind: ClauseKind,
        operand: &serde_json::Value,
    ) -> Result<Value> {
        let coerce = |raw: &serde_json::Value| {
            column.constraint.transform(raw).map_err(|err| {
                Error::invalid_filter(format!(
                    "value for `{}` does not match its type: {err}",
                    column.name
                ))
            })
        };

        match kind {
            ClauseKind::In | ClauseKind::NotIn => {
                let Some(items) = operand.as_array() else {
                    return Err(Error::invalid_filter(format!(
                        "membership filter on `{}` expects a list",
                        column.name
                    )));
                };
                let items: Vec<Value> = items.iter().map(coerce).collect::<Result<_>>()?;
                Ok(Value::List(items))
            }
            _ => coerce(operand),
        }
    }

    fn unknown_attr(&self, model: &ModelSchema, name: &str) -> Error {
        Error::invalid_filter(format!(
            "`{}` has no attribute `{name}`",
            model.full_name()
        ))
    }
}

/// A non-group entry is `"path": [operator, value]`.
fn split_op_and_value<'v>(
    key: &str,
    value: &'v serde_json::Value,
) -> Result<(FilterOp, &'v serde_json::Value)> {
    let Some([op, operand]) = value.as_array().map(Vec::as_slice) else {
        return Err(Error::invalid_filter(format!(
            "`{key}` must map to an [operator, value] pair"
        )));
    };
    let Some(op) = op.as_str() else {
        return Err(Error::invalid_filter(format!(
            "`{key}` operator must be a string"
        )));
    };
    let op: FilterOp = op
        .parse()
        .map_err(|()| Error::invalid_filter(format!("unknown operator `{op}`")))?;
    Ok((op, operand))
}
