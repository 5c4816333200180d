//! PostgreSQL implementation of the click repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick};
use crate::domain::repositories::{ClickRepository, DailyCount};
use crate::error::AppError;

use super::rows::ClickRow;

/// PostgreSQL repository for click events and aggregation queries.
///
/// The event append and the counter increment run in one transaction, so a
/// failed or cancelled write leaves neither behind.
pub struct PgClickRepository {
    pool: Arc<PgPool>,
}

impl PgClickRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClickRepository for PgClickRepository {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE links SET click_count = click_count + 1 WHERE id = $1")
            .bind(new_click.link_id)
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::not_found(
                "Link not found",
                json!({ "link_id": new_click.link_id }),
            ));
        }

        let row: ClickRow = sqlx::query_as(
            r#"
            INSERT INTO link_clicks (link_id, ip, user_agent, referer, country)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, link_id, clicked_at, ip, user_agent, referer, country
            "#,
        )
        .bind(new_click.link_id)
        .bind(&new_click.ip)
        .bind(&new_click.user_agent)
        .bind(&new_click.referer)
        .bind(&new_click.country)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn count_by_day(
        &self,
        owner_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyCount>, AppError> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            r#"
            SELECT (c.clicked_at AT TIME ZONE 'UTC')::date AS date,
                   COUNT(*)::bigint AS count
            FROM link_clicks c
            JOIN links l ON l.id = c.link_id
            WHERE l.owner_id = $1
              AND (c.clicked_at AT TIME ZONE 'UTC')::date BETWEEN $2 AND $3
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(owner_id)
        .bind(from)
        .bind(to)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect())
    }

    async fn count_between(
        &self,
        owner_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)::bigint
            FROM link_clicks c
            JOIN links l ON l.id = c.link_id
            WHERE l.owner_id = $1
              AND c.clicked_at >= $2
              AND c.clicked_at < $3
            "#,
        )
        .bind(owner_id)
        .bind(from)
        .bind(to)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }
}
