use super::FilterOp;
use crate::{schema::ScalarType, Value};

use std::fmt;

/// A node in a compiled filter tree.
#[derive(Debug, Clone)]
pub enum ClauseNode {
    Clause(Clause),
    Group(ClauseGroup),
}

impl ClauseNode {
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    pub fn as_clause(&self) -> Option<&Clause> {
        match self {
            Self::Clause(clause) => Some(clause),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&ClauseGroup> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }
}

/// A typed leaf comparison.
#[derive(Debug, Clone)]
pub struct Clause {
    /// Dotted attribute path from the root model; every segment but the
    /// last traverses a relation.
    pub path: Vec<String>,

    /// Scalar type of the column the path resolves to
    pub ty: ScalarType,

    pub kind: ClauseKind,

    /// Comparison operand, coerced through the column's constraint
    /// (a list for membership kinds)
    pub value: Value,
}

impl Clause {
    /// The path as callers wrote it.
    pub fn field(&self) -> String {
        self.path.join(".")
    }
}

/// The comparison semantics of a clause, resolved from `(type, operator)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClauseKind {
    Compare(CompareOp),
    In,
    NotIn,
    StartsWith,
    EndsWith,
    Contains,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

/// A boolean combinator over child nodes. Never empty.
#[derive(Debug, Clone)]
pub struct ClauseGroup {
    pub kind: GroupKind,
    pub children: Vec<ClauseNode>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GroupKind {
    And,
    Or,
    /// Negates the conjunction of the children
    Not,
}

impl GroupKind {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "[and]" => Some(Self::And),
            "[or]" => Some(Self::Or),
            "[not]" => Some(Self::Not),
            _ => None,
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::And => "[and]",
            Self::Or => "[or]",
            Self::Not => "[not]",
        };
        f.write_str(tag)
    }
}

/// Resolves a `(scalar type, operator)` pair to its clause semantics.
///
/// This is the engine's operator registration table: a closed mapping fixed
/// at startup. `None` means the combination is not registered, which the
/// builder reports as a structural filter error.
pub fn clause_kind(ty: ScalarType, op: FilterOp) -> Option<ClauseKind> {
    use FilterOp::*;

    let kind = match op {
        Eq => ClauseKind::Compare(CompareOp::Eq),
        Ne => ClauseKind::Compare(CompareOp::Ne),
        Lt if ty.is_ordered() => ClauseKind::Compare(CompareOp::Lt),
        Lte if ty.is_ordered() => ClauseKind::Compare(CompareOp::Lte),
        Gt if ty.is_ordered() => ClauseKind::Compare(CompareOp::Gt),
        Gte if ty.is_ordered() => ClauseKind::Compare(CompareOp::Gte),
        In if !ty.is_boolean() => ClauseKind::In,
        NotIn if !ty.is_boolean() => ClauseKind::NotIn,
        StartsWith if ty.is_textual() => ClauseKind::StartsWith,
        EndsWith if ty.is_textual() => ClauseKind::EndsWith,
        Contains if ty.is_textual() => ClauseKind::Contains,
        _ => return None,
    };
    Some(kind)
}
