//! PostgreSQL implementation of the definition store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::Definition;
use crate::domain::pagination::{DefinitionFilter, Page, PageToken};
use crate::domain::repositories::DefinitionStore;
use crate::error::AppError;

/// PostgreSQL store keeping each definition as a JSONB document.
///
/// The `tag` column duplicates the document's tag so listings can filter on
/// an index. Scans are keyset-paginated on `id`.
pub struct PgDefinitionStore {
    pool: Arc<PgPool>,
}

impl PgDefinitionStore {
    /// Creates a new store with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DefinitionStore for PgDefinitionStore {
    async fn get(&self, id: &str) -> Result<Option<Definition>, AppError> {
        let row: Option<(Json<Definition>,)> =
            sqlx::query_as("SELECT document FROM definitions WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(|(Json(definition),)| definition))
    }

    async fn put(&self, definition: &Definition) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO definitions (id, tag, document)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET tag = EXCLUDED.tag, document = EXCLUDED.document
            "#,
        )
        .bind(&definition.id)
        .bind(definition.tag.as_deref())
        .bind(Json(definition))
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn scan(
        &self,
        filter: &DefinitionFilter,
        page_token: Option<PageToken>,
        page_size: usize,
    ) -> Result<Page<Definition>, AppError> {
        let after = page_token.map(|t| t.resume_after()).transpose()?;
        // One extra row tells us whether another page exists.
        let limit = i64::try_from(page_size).unwrap_or(i64::MAX - 1) + 1;

        let rows: Vec<(Json<Definition>,)> = sqlx::query_as(
            r#"
            SELECT document
            FROM definitions
            WHERE ($1::text IS NULL OR tag = $1)
              AND ($2::text IS NULL OR id > $2)
            ORDER BY id
            LIMIT $3
            "#,
        )
        .bind(filter.tag.as_deref())
        .bind(after)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut items: Vec<Definition> = rows.into_iter().map(|(Json(d),)| d).collect();
        let next_page_token = if items.len() > page_size {
            items.truncate(page_size);
            items.last().map(|d| PageToken::after(&d.id))
        } else {
            None
        };

        Ok(Page::new(items, next_page_token))
    }

    async fn count(&self) -> Result<u64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM definitions")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn fetch_at(&self, offset: u64) -> Result<Option<Definition>, AppError> {
        let Ok(offset) = i64::try_from(offset) else {
            return Ok(None);
        };

        let row: Option<(Json<Definition>,)> =
            sqlx::query_as("SELECT document FROM definitions ORDER BY id OFFSET $1 LIMIT 1")
                .bind(offset)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(row.map(|(Json(definition),)| definition))
    }
}
