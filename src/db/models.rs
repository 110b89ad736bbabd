use chrono::{DateTime, Utc};

/// A single row of the `links` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Link {
    pub code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked_at: Option<DateTime<Utc>>,
}
