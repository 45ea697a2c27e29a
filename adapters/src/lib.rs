//! Core `adapters` crate for abstracting document persistence.
//!
//! This crate defines the `DocumentStore` trait, which outlines the generic
//! operations the backend performs against its collections, and provides the
//! concrete implementations: Postgres (JSONB documents) and an in-process store.

pub mod errors;
pub mod memory;
pub mod models;
pub mod postgres;

pub use errors::StoreError;
pub use memory::MemoryStore;
pub use models::{contains, with_id, ID_FIELD};
pub use postgres::PostgresStore;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

/// A collection-oriented JSON document store.
///
/// Filters are JSON documents matched by containment (see [`contains`]).
/// Results come back in insertion order.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, collection: &str, id: Uuid, doc: Value) -> Result<(), StoreError>;

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Value>, StoreError>;

    async fn find(&self, collection: &str, filter: &Value) -> Result<Vec<Value>, StoreError>;

    async fn find_one(&self, collection: &str, filter: &Value) -> Result<Option<Value>, StoreError> {
        Ok(self.find(collection, filter).await?.into_iter().next())
    }

    /// Replaces the whole document. Returns `false` when nothing had that id.
    async fn replace(&self, collection: &str, id: Uuid, doc: Value) -> Result<bool, StoreError>;

    /// Deletes every document containing `filter`, returning how many went.
    async fn delete(&self, collection: &str, filter: &Value) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
