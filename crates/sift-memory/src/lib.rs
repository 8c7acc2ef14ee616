//! In-memory backend: a [`sift::Repository`] implementation plus a filter
//! processor that compiles clause trees into plain predicates over value
//! records. Exists so the engine can be exercised end-to-end without a
//! storage engine.

mod predicate;
pub use predicate::{Predicate, PredicateProcessor};

mod store;
pub use store::{MemoryRepository, MemoryStore};
