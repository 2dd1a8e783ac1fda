//! PostgreSQL store
//!
//! Uses sqlx PgPool; the pool's acquire timeout bounds server selection
//! and its idle timeout bounds idle sockets.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::store::{ConnectOptions, Connector, ContactStore};
use crate::error::StoreError;
use crate::models::{ContactMessage, NewContactMessage};

/// Contact message store backed by a Postgres pool
#[derive(Debug, Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Create the contact_messages table if it doesn't exist.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contact_messages (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            message TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::debug!("contact_messages schema ready");
    Ok(())
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn insert(&self, message: NewContactMessage) -> Result<ContactMessage, StoreError> {
        let record: ContactMessage = sqlx::query_as(
            r#"
            INSERT INTO contact_messages (name, email, message, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, message, created_at, updated_at
            "#,
        )
        .bind(message.name())
        .bind(message.email())
        .bind(message.message())
        .bind(message.created_at())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_all(&self) -> Result<Vec<ContactMessage>, StoreError> {
        let records = sqlx::query_as::<_, ContactMessage>(
            "SELECT id, name, email, message, created_at, updated_at FROM contact_messages",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn close(&self) -> Result<(), StoreError> {
        self.pool.close().await;
        Ok(())
    }
}

/// Connects to Postgres and prepares the schema
#[derive(Debug, Clone, Copy, Default)]
pub struct PgConnector;

#[async_trait]
impl Connector for PgConnector {
    async fn connect(
        &self,
        url: &str,
        options: &ConnectOptions,
    ) -> Result<Arc<dyn ContactStore>, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.server_selection_timeout)
            .idle_timeout(options.socket_timeout)
            .connect(url)
            .await?;

        run_migrations(&pool).await?;

        Ok(Arc::new(PgContactStore::new(pool)))
    }
}
