//! Custom error types specific to the `adapters` crate.
//!
//! This module defines errors that can occur while reading or writing documents,
//! whichever backend holds them, so that callers handle a single error type for
//! every store operation.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document {id} already exists in {collection}")]
    Duplicate { collection: String, id: Uuid },

    #[error("Documents must be JSON objects")]
    NotAnObject,

    #[error("Store backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_collection() {
        let id = Uuid::nil();
        let err = StoreError::Duplicate {
            collection: "carts".to_string(),
            id,
        };
        assert_eq!(
            err.to_string(),
            format!("Document {id} already exists in carts")
        );
    }

    #[test]
    fn test_sqlx_error_maps_to_backend() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
