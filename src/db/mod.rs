use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod models;
pub mod postgres;
pub mod sqlite;

use models::Link;

/// Errors raised by a [`LinkStore`] backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("a link with this code already exists")]
    UniqueViolation,
    #[error("database error: {0}")]
    Database(sqlx::Error),
    #[error("failed to run migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("unsupported database url: {0}")]
    UnsupportedUrl(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::UniqueViolation
            }
            _ => StoreError::Database(err),
        }
    }
}

/// Persistence for the `links` table.
///
/// Every method is a single statement against the database, so the atomicity
/// of each operation is whatever the database gives a single statement.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Inserts a new link with zero clicks. Fails with
    /// [`StoreError::UniqueViolation`] if the code is taken.
    async fn create(
        &self,
        code: &str,
        original_url: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Link, StoreError>;

    async fn find_unique(&self, code: &str) -> Result<Option<Link>, StoreError>;

    /// All links, newest first.
    async fn find_many(&self) -> Result<Vec<Link>, StoreError>;

    /// Increments `clicks` and stamps `last_clicked_at` in one update,
    /// returning the destination url if the code exists.
    async fn record_click(
        &self,
        code: &str,
        clicked_at: DateTime<Utc>,
    ) -> Result<Option<String>, StoreError>;

    /// Returns `false` if there was nothing to delete.
    async fn delete(&self, code: &str) -> Result<bool, StoreError>;

    /// Releases the underlying connection pool.
    async fn close(&self);
}

/// Opens the backend matching the scheme of `database_url` and brings its
/// schema up to date.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> Result<Arc<dyn LinkStore>, StoreError> {
    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        let store = postgres::PgLinkStore::connect(database_url, max_connections).await?;
        Ok(Arc::new(store))
    } else if database_url.starts_with("sqlite:") {
        let store = sqlite::SqliteLinkStore::connect(database_url, max_connections).await?;
        Ok(Arc::new(store))
    } else {
        Err(StoreError::UnsupportedUrl(database_url.to_string()))
    }
}
