//! Typed collection access (Data Access Objects).
//!
//! This module centralizes all direct store operations: a [`Collection`] wraps
//! the untyped [`DocumentStore`] and converts documents to and from the model
//! structs, so services never touch raw JSON for persistence.

use std::marker::PhantomData;
use std::sync::Arc;

use adapters::{DocumentStore, StoreError};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// A model stored in its own collection.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;
}

pub struct Collection<T> {
    store: Arc<dyn DocumentStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub async fn insert(&self, doc: &T) -> Result<(), StoreError> {
        self.store
            .insert(T::COLLECTION, doc.id(), serde_json::to_value(doc)?)
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        self.store
            .find_by_id(T::COLLECTION, id)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn find(&self, filter: Value) -> Result<Vec<T>, StoreError> {
        self.store
            .find(T::COLLECTION, &filter)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    pub async fn find_one(&self, filter: Value) -> Result<Option<T>, StoreError> {
        self.store
            .find_one(T::COLLECTION, &filter)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn all(&self) -> Result<Vec<T>, StoreError> {
        self.find(json!({})).await
    }

    pub async fn replace(&self, doc: &T) -> Result<bool, StoreError> {
        self.store
            .replace(T::COLLECTION, doc.id(), serde_json::to_value(doc)?)
            .await
    }

    pub async fn delete(&self, filter: Value) -> Result<u64, StoreError> {
        self.store.delete(T::COLLECTION, &filter).await
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.delete(json!({ "_id": id })).await? > 0)
    }
}

fn decode<T: DeserializeOwned>(doc: Value) -> Result<T, StoreError> {
    Ok(serde_json::from_value(doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Cart;
    use adapters::MemoryStore;
    use chrono::Utc;

    fn cart_for(user: Uuid) -> Cart {
        let now = Utc::now();
        Cart {
            id: Uuid::new_v4(),
            user,
            cart_items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_typed_round_trip_through_store() {
        let carts: Collection<Cart> = Collection::new(Arc::new(MemoryStore::new()));
        let user = Uuid::new_v4();
        let cart = cart_for(user);
        carts.insert(&cart).await.unwrap();

        let found = carts.find_one(json!({ "user": user })).await.unwrap().unwrap();
        assert_eq!(found.id, cart.id);
        assert!(carts.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let carts: Collection<Cart> = Collection::new(Arc::new(MemoryStore::new()));
        let cart = cart_for(Uuid::new_v4());
        carts.insert(&cart).await.unwrap();

        assert!(carts.delete_by_id(cart.id).await.unwrap());
        assert!(!carts.delete_by_id(cart.id).await.unwrap());
        assert!(carts.all().await.unwrap().is_empty());
    }
}
