use super::ModelSchema;

/// Schema of an owned, ordered collection of child rows.
///
/// Child rows are keyed by owner plus row number; they are validated in
/// bulk through their own attribute schemas.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ListSchema {
    pub name: String,

    /// Full name of the owning record type
    pub owner: String,

    /// The child-row record type, with its own columns/relations/composites
    pub row_model: ModelSchema,

    /// Column in the row model referencing the owner
    pub owner_key: String,

    /// Column in the row model holding the position within the collection
    pub row_number: String,
}
