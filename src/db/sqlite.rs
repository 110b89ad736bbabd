use std::{str::FromStr, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};
use tracing::{info, warn};

use super::{models::Link, LinkStore, StoreError};

#[derive(Debug, Clone)]
pub struct SqliteLinkStore {
    pool: SqlitePool,
}

impl SqliteLinkStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // every connection to an in-memory database gets its own empty database
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let options = if in_memory {
            options
        } else {
            // concurrent writers wait on the lock instead of failing with SQLITE_BUSY
            options
                .journal_mode(SqliteJournalMode::Wal)
                .busy_timeout(Duration::from_secs(10))
        };
        let pool_options = if in_memory {
            if max_connections != 1 {
                warn!(max_connections, "In-memory SQLite is limited to a single connection");
            }
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        sqlx::migrate!("./migrations/sqlite").run(&pool).await?;
        info!(in_memory, "Connected to SQLite");
        Ok(Self { pool })
    }
}

#[async_trait]
impl LinkStore for SqliteLinkStore {
    async fn create(
        &self,
        code: &str,
        original_url: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Link, StoreError> {
        let link = sqlx::query_as::<_, Link>(
            "
            INSERT INTO links (code, original_url, clicks, created_at)
            VALUES (?, ?, 0, ?)
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
            WHERE code = ?
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
            SET clicks = clicks + 1, last_clicked_at = ?
            WHERE code = ?
            RETURNING original_url
            ",
        )
        .bind(clicked_at)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(original_url)
    }

    async fn delete(&self, code: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM links WHERE code = ?")
            .bind(code)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
