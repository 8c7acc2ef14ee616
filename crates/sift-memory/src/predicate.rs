use crate::MemoryStore;

use sift_core::{
    filter::{Clause, ClauseKind, CompareOp, GroupKind, Processor},
    schema::{AttrSchema, ModelSchema},
    value::{value_partial_cmp, ValueRecord},
    Error, Result, Schema, Value,
};

use std::cmp::Ordering;

/// An executable filter predicate over value records.
pub type Predicate = Box<dyn Fn(&ValueRecord) -> bool + Send + Sync>;

/// Compiles clause trees into [`Predicate`]s.
///
/// Relation hops are evaluated against row snapshots taken at compile time,
/// so a predicate owns everything it needs and borrows nothing.
pub struct PredicateProcessor<'a> {
    store: &'a MemoryStore,
    schema: &'a Schema,
    model: &'a ModelSchema,
}

struct Hop {
    /// Column on the current side holding the key
    local_key: String,

    /// Column on the target side the key points at
    remote_key: String,

    /// Snapshot of the target model's rows
    rows: Vec<ValueRecord>,
}

impl<'a> PredicateProcessor<'a> {
    pub fn new(store: &'a MemoryStore, schema: &'a Schema, model: &'a ModelSchema) -> Self {
        PredicateProcessor {
            store,
            schema,
            model,
        }
    }

    /// Compiles sibling nodes and conjoins them, the way a storage layer
    /// applies a filter list.
    pub fn compile(&mut self, nodes: &[sift_core::filter::ClauseNode]) -> Result<Predicate> {
        let compiled = self.process(nodes)?;
        Ok(all_of(compiled))
    }

    /// Re-resolves the clause path into relation hops plus the record field
    /// the comparison reads. A terminal forward relation reads its stored
    /// local key.
    fn resolve(&self, clause: &Clause) -> Result<(Vec<Hop>, String)> {
        let mut model = self.model;
        let mut hops = Vec::new();

        let (last, traversal) = clause.path.split_last().expect("clause path is never empty");
        for segment in traversal {
            let relation = model
                .attr(segment)
                .and_then(AttrSchema::as_relation)
                .ok_or_else(|| {
                    Error::invalid_filter(format!(
                        "`{}.{segment}` is not a relation",
                        model.full_name()
                    ))
                })?;
            if !relation.is_forward() {
                return Err(Error::invalid_filter(format!(
                    "memory predicates cannot traverse reverse relation `{segment}`"
                )));
            }
            let target = self.schema.model(&relation.to_model);
            hops.push(Hop {
                local_key: relation.local_key.clone(),
                remote_key: relation.remote_key.clone(),
                rows: self.store.rows(&relation.to_model).to_vec(),
            });
            model = target;
        }

        let field = match model.attr(last) {
            Some(AttrSchema::Column(column)) => column.name.clone(),
            Some(AttrSchema::Relation(relation)) if relation.is_forward() => {
                relation.local_key.clone()
            }
            _ => {
                return Err(Error::invalid_filter(format!(
                    "`{}.{last}` cannot be evaluated",
                    model.full_name()
                )))
            }
        };
        Ok((hops, field))
    }
}

impl Processor for PredicateProcessor<'_> {
    type Output = Predicate;

    fn clause(&mut self, clause: &Clause) -> Result<Predicate> {
        let (hops, field) = self.resolve(clause)?;
        let kind = clause.kind;
        let operand = clause.value.clone();

        Ok(Box::new(move |record| {
            let mut current = record;
            for hop in &hops {
                let key = current.get(&hop.local_key);
                if key.is_null() {
                    return false;
                }
                match hop.rows.iter().find(|row| row.get(&hop.remote_key) == key) {
                    Some(row) => current = row,
                    None => return false,
                }
            }
            eval(kind, current.get(&field), &operand)
        }))
    }

    fn group(&mut self, kind: GroupKind, children: Vec<Predicate>) -> Result<Predicate> {
        Ok(match kind {
            GroupKind::And => all_of(children),
            GroupKind::Or => Box::new(move |record| children.iter().any(|child| child(record))),
            GroupKind::Not => {
                let conjunction = all_of(children);
                Box::new(move |record| !conjunction(record))
            }
        })
    }
}

fn all_of(children: Vec<Predicate>) -> Predicate {
    Box::new(move |record| children.iter().all(|child| child(record)))
}

fn eval(kind: ClauseKind, field: &Value, operand: &Value) -> bool {
    match kind {
        ClauseKind::Compare(CompareOp::Eq) => field == operand,
        ClauseKind::Compare(CompareOp::Ne) => field != operand,
        ClauseKind::Compare(op) => match value_partial_cmp(field, operand) {
            Some(ordering) => match op {
                CompareOp::Lt => ordering == Ordering::Less,
                CompareOp::Lte => ordering != Ordering::Greater,
                CompareOp::Gt => ordering == Ordering::Greater,
                CompareOp::Gte => ordering != Ordering::Less,
                CompareOp::Eq | CompareOp::Ne => unreachable!(),
            },
            None => false,
        },
        ClauseKind::In => operand
            .as_list()
            .is_some_and(|items| items.contains(field)),
        ClauseKind::NotIn => operand
            .as_list()
            .is_some_and(|items| !items.contains(field)),
        ClauseKind::StartsWith => match (field.as_str(), operand.as_str()) {
            (Some(field), Some(operand)) => field.starts_with(operand),
            _ => false,
        },
        ClauseKind::EndsWith => match (field.as_str(), operand.as_str()) {
            (Some(field), Some(operand)) => field.ends_with(operand),
            _ => false,
        },
        ClauseKind::Contains => match (field.as_str(), operand.as_str()) {
            (Some(field), Some(operand)) => field.contains(operand),
            _ => false,
        },
    }
}
