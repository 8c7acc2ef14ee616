//! Declarative filter expressions compiled into typed clause trees.
//!
//! Input is a nested mapping: bracketed keys (`[and]`, `[or]`, `[not]`)
//! introduce boolean groups, any other key is a dotted attribute path mapped
//! to an `[operator, value]` pair. The builder resolves paths across
//! relation schemas and types every comparison; a [`Processor`] then
//! compiles the opaque tree into whatever predicate its backend executes.

mod builder;
pub use builder::FilterBuilder;

mod clause;
pub use clause::{
    clause_kind, Clause, ClauseGroup, ClauseKind, ClauseNode, CompareOp, GroupKind,
};

mod op;
pub use op::FilterOp;

mod processor;
pub use processor::Processor;
