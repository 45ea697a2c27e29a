//! Generic document helpers shared by every store implementation.
//!
//! Documents are JSON objects carrying their own `_id`. Queries are expressed as
//! filter documents and matched by containment, the same rule Postgres applies
//! to `jsonb @> jsonb`, so both backends answer a filter identically.

use serde_json::Value;
use uuid::Uuid;

use crate::errors::StoreError;

/// Field holding a document's identifier.
pub const ID_FIELD: &str = "_id";

/// Returns `true` when `doc` contains `filter`.
///
/// Objects contain every key of the filter with a containing value, arrays
/// contain each filter element in at least one of their elements, and scalars
/// must compare equal.
pub fn contains(doc: &Value, filter: &Value) -> bool {
    match (doc, filter) {
        (Value::Object(doc), Value::Object(filter)) => filter
            .iter()
            .all(|(key, want)| doc.get(key).is_some_and(|have| contains(have, want))),
        (Value::Array(doc), Value::Array(filter)) => filter
            .iter()
            .all(|want| doc.iter().any(|have| contains(have, want))),
        _ => doc == filter,
    }
}

/// Checks that `doc` is an object and stamps `id` into its `_id` field.
pub fn with_id(mut doc: Value, id: Uuid) -> Result<Value, StoreError> {
    let map = doc.as_object_mut().ok_or(StoreError::NotAnObject)?;
    map.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
    Ok(doc)
}
