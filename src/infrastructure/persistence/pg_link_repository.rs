//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

use super::rows::LinkRow;

/// PostgreSQL repository for link storage and retrieval.
///
/// Code uniqueness rides on the `links_code_key` unique constraint, so a
/// racing duplicate insert surfaces as a conflict rather than a lost write.
/// One-time consumption is a conditional `UPDATE`, serialized by row-level
/// locking.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row: LinkRow = sqlx::query_as(
            r#"
            INSERT INTO links (code, target_url, owner_id, expires_at, view_once)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, code, target_url, owner_id, created_at, expires_at,
                      view_once, active, consumed_at, click_count
            "#,
        )
        .bind(&new_link.code)
        .bind(&new_link.target_url)
        .bind(new_link.owner_id)
        .bind(new_link.expires_at)
        .bind(new_link.view_once)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row: Option<LinkRow> = sqlx::query_as(
            r#"
            SELECT id, code, target_url, owner_id, created_at, expires_at,
                   view_once, active, consumed_at, click_count
            FROM links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let rows: Vec<LinkRow> = sqlx::query_as(
            r#"
            SELECT id, code, target_url, owner_id, created_at, expires_at,
                   view_once, active, consumed_at, click_count
            FROM links
            WHERE owner_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn try_consume(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET consumed_at = NOW()
            WHERE code = $1 AND view_once AND consumed_at IS NULL
            "#,
        )
        .bind(code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn deactivate(&self, code: &str, owner_id: i64) -> Result<(), AppError> {
        let existing_owner: Option<Option<i64>> =
            sqlx::query_scalar("SELECT owner_id FROM links WHERE code = $1")
                .bind(code)
                .fetch_optional(self.pool.as_ref())
                .await?;

        match existing_owner {
            None => Err(AppError::not_found(
                "Short link not found",
                json!({ "code": code }),
            )),
            Some(owner) if owner != Some(owner_id) => Err(AppError::unauthorized(
                "You do not own this link",
                json!({ "code": code }),
            )),
            Some(_) => {
                sqlx::query("UPDATE links SET active = FALSE WHERE code = $1")
                    .bind(code)
                    .execute(self.pool.as_ref())
                    .await?;
                Ok(())
            }
        }
    }
}
