//! Module for store connection setup and the typed collections.
//!
//! This module is responsible for choosing and initializing the document
//! store backend and exposing one [`Collection`] per model.

pub mod models;
pub mod queries;

use std::sync::Arc;

use adapters::{DocumentStore, MemoryStore, PostgresStore, StoreError};
use tracing::{info, warn};

use crate::config::Config;
use models::{Cart, Category, Order, Product, User, UserAddress};
pub use queries::{Collection, Document};

/// Connects to Postgres when a database URL is configured, otherwise falls
/// back to the in-memory store.
pub async fn connect(config: &Config) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match &config.database_url {
        Some(url) => {
            let store = PostgresStore::connect(url, config.database_max_connections).await?;
            store.migrate().await?;
            info!("Using Postgres document store");
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set, data will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[derive(Clone)]
pub struct Database {
    store: Arc<dyn DocumentStore>,
    pub users: Collection<User>,
    pub categories: Collection<Category>,
    pub products: Collection<Product>,
    pub carts: Collection<Cart>,
    pub addresses: Collection<UserAddress>,
    pub orders: Collection<Order>,
}

impl Database {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: Collection::new(store.clone()),
            categories: Collection::new(store.clone()),
            products: Collection::new(store.clone()),
            carts: Collection::new(store.clone()),
            addresses: Collection::new(store.clone()),
            orders: Collection::new(store.clone()),
            store,
        }
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.store.ping().await
    }
}
