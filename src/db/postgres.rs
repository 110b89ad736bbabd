use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use super::{models::Link, LinkStore, StoreError};

#[derive(Debug, Clone)]
pub struct PgLinkStore {
    pool: PgPool,
}

impl PgLinkStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        sqlx::migrate!("./migrations/postgres").run(&pool).await?;
        info!(max_connections, "Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Wraps a pool whose schema is already migrated.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for PgLinkStore {
    async fn create(
        &self,
        code: &str,
        original_url: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Link, StoreError> {
        let link = sqlx::query_as::<_, Link>(
            "
            INSERT INTO links (code, original_url, clicks, created_at)
            VALUES ($1, $2, 0, $3)
            RETURNING code, original_url, clicks, created_at, last_clicked_at
            ",
        )
        .bind(code)
        .bind(original_url)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }

    async fn find_unique(&self, code: &str) -> Result<Option<Link>, StoreError> {
        let link = sqlx::query_as::<_, Link>(
            "
            SELECT code, original_url, clicks, created_at, last_clicked_at
            FROM links
            WHERE code = $1
            ",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(link)
    }

    async fn find_many(&self) -> Result<Vec<Link>, StoreError> {
        let links = sqlx::query_as::<_, Link>(
            "
            SELECT code, original_url, clicks, created_at, last_clicked_at
            FROM links
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(links)
    }

    async fn record_click(
        &self,
        code: &str,
        clicked_at: DateTime<Utc>,
    ) -> Result<Option<String>, StoreError> {
        let original_url: Option<String> = sqlx::query_scalar(
            "
            UPDATE links
            SET clicks = clicks + 1, last_clicked_at = $2
            WHERE code = $1
            RETURNING original_url
            ",
        )
        .bind(code)
        .bind(clicked_at)
        .fetch_optional(&self.pool)
        .await?;
        Ok(original_url)
    }

    async fn delete(&self, code: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM links WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
