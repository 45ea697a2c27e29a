//! Postgres implementation of [`DocumentStore`].
//!
//! Every collection lives in one `documents` table keyed by
//! `(collection, id)`, with the body in a JSONB column. Filters are pushed down
//! as `doc @> $filter`, served by a GIN index.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::with_id;
use crate::DocumentStore;

const SCHEMA: [&str; 2] = [
    r#"CREATE TABLE IF NOT EXISTS documents (
           seq BIGSERIAL,
           collection TEXT NOT NULL,
           id UUID NOT NULL,
           doc JSONB NOT NULL,
           created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
           updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
           PRIMARY KEY (collection, id)
       )"#,
    "CREATE INDEX IF NOT EXISTS documents_doc_idx ON documents USING GIN (doc jsonb_path_ops)",
];

pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        info!("Connected to database");
        Ok(Self::new(pool))
    }

    /// Creates the documents table and index when missing.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn insert(&self, collection: &str, id: Uuid, doc: Value) -> Result<(), StoreError> {
        let doc = with_id(doc, id)?;
        let result = sqlx::query(
            r#"INSERT INTO documents (collection, id, doc)
               VALUES ($1, $2, $3)
               ON CONFLICT (collection, id) DO NOTHING"#,
        )
        .bind(collection)
        .bind(id)
        .bind(doc)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
                id,
            });
        }
        Ok(())
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Value>, StoreError> {
        let doc = sqlx::query_scalar::<_, Value>(
            "SELECT doc FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn find(&self, collection: &str, filter: &Value) -> Result<Vec<Value>, StoreError> {
        let docs = sqlx::query_scalar::<_, Value>(
            r#"SELECT doc FROM documents
               WHERE collection = $1 AND doc @> $2
               ORDER BY seq ASC"#,
        )
        .bind(collection)
        .bind(filter)
        .fetch_all(&self.pool)
        .await?;
        Ok(docs)
    }

    async fn find_one(&self, collection: &str, filter: &Value) -> Result<Option<Value>, StoreError> {
        let doc = sqlx::query_scalar::<_, Value>(
            r#"SELECT doc FROM documents
               WHERE collection = $1 AND doc @> $2
               ORDER BY seq ASC
               LIMIT 1"#,
        )
        .bind(collection)
        .bind(filter)
        .fetch_optional(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn replace(&self, collection: &str, id: Uuid, doc: Value) -> Result<bool, StoreError> {
        let doc = with_id(doc, id)?;
        let result = sqlx::query(
            r#"UPDATE documents SET doc = $1, updated_at = NOW()
               WHERE collection = $2 AND id = $3"#,
        )
        .bind(doc)
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: &str, filter: &Value) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND doc @> $2")
            .bind(collection)
            .bind(filter)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
