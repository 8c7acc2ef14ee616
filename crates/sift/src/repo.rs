use sift_core::{value::ValueRecord, Result, Value};

use async_trait::async_trait;

/// The persistence boundary validators call into.
///
/// Implementations handle uniqueness probes and relation lookups; every
/// method is an I/O suspension point. The engine never opens transactions or
/// manages sessions through this trait.
#[async_trait]
pub trait Repository: Send + Sync {
    /// The record being updated, or `None` when validating a creation.
    fn current(&self) -> Option<&ValueRecord>;

    /// Whether `value` is unused for `attr`, excluding the current record.
    async fn check_unique(&self, attr: &str, value: &Value) -> Result<bool>;

    /// Resolves a forward relation by key. `None` means the referenced row
    /// does not exist.
    async fn get_related(&self, relation: &str, key: &Value) -> Result<Option<ValueRecord>>;

    /// Bulk form of [`Repository::get_related`]: one round trip for a whole
    /// batch of keys. Missing keys are simply absent from the result.
    async fn get_related_many(
        &self,
        relation: &str,
        keys: &[Value],
    ) -> Result<Vec<(Value, ValueRecord)>>;
}
