//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::error::UrlStoreError;
use crate::domain::repositories::UrlRepository;

/// PostgreSQL repository for URL mappings.
///
/// Uses SQLx prepared statements for SQL injection protection. Uniqueness is
/// enforced by the `urls_short_url_key` constraint; inserts use
/// `ON CONFLICT DO NOTHING` so a taken code yields no row instead of an error.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UrlRow {
    short_url: String,
    long_url: String,
    created_at: DateTime<Utc>,
}

impl From<UrlRow> for UrlMapping {
    fn from(row: UrlRow) -> Self {
        UrlMapping::new(row.short_url, row.long_url, row.created_at)
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert_if_absent(
        &self,
        new_mapping: NewUrlMapping,
    ) -> Result<Option<UrlMapping>, UrlStoreError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (short_url, long_url)
            VALUES ($1, $2)
            ON CONFLICT (short_url) DO NOTHING
            RETURNING short_url, long_url, created_at
            "#,
        )
        .bind(&new_mapping.short_code)
        .bind(&new_mapping.long_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn exists(&self, short_code: &str) -> Result<bool, UrlStoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM urls WHERE short_url = $1)",
        )
        .bind(short_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn find_long_url(&self, short_code: &str) -> Result<Option<String>, UrlStoreError> {
        let long_url =
            sqlx::query_scalar::<_, String>("SELECT long_url FROM urls WHERE short_url = $1")
                .bind(short_code)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(long_url)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, UrlStoreError> {
        let row = sqlx::query_as::<_, UrlRow>(
            "SELECT short_url, long_url, created_at FROM urls WHERE short_url = $1",
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn count(&self) -> Result<i64, UrlStoreError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), UrlStoreError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
