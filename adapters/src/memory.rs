//! In-process implementation of [`DocumentStore`].
//!
//! Used when no database is configured and as the backing store for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{contains, with_id};
use crate::DocumentStore;

#[derive(Default, Clone)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<(Uuid, Value)>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, id: Uuid, doc: Value) -> Result<(), StoreError> {
        let doc = with_id(doc, id)?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.iter().any(|(existing, _)| *existing == id) {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
                id,
            });
        }
        docs.push((id, doc));
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|(existing, _)| *existing == id)
                .map(|(_, doc)| doc.clone())
        }))
    }

    async fn find(&self, collection: &str, filter: &Value) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| contains(doc, filter))
                    .map(|(_, doc)| doc.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn replace(&self, collection: &str, id: Uuid, doc: Value) -> Result<bool, StoreError> {
        let doc = with_id(doc, id)?;
        let mut collections = self.collections.write().await;
        let slot = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|(existing, _)| *existing == id));
        match slot {
            Some((_, current)) => {
                *current = doc;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: &str, filter: &Value) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|(_, doc)| !contains(doc, filter));
        Ok((before - docs.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
