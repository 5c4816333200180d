//! Repository trait for click recording and aggregation reads.

use crate::domain::entities::{Click, NewClick};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

/// Click total for a single UTC calendar date.
///
/// Rows are sparse: dates without clicks are absent and zero-filled by
/// the aggregation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Repository interface for click events.
///
/// Writes are append-only: an event is inserted and the owning link's
/// `click_count` incremented inside one transactional boundary, so the
/// counter can never diverge from the event history by a partial write.
/// Aggregation reads never block writers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgClickRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickRepository: Send + Sync {
    /// Records a click event and increments the link's counter.
    ///
    /// The append and the increment commit together or not at all; a
    /// cancelled call leaves neither behind.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the referenced link does not exist.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError>;

    /// Counts clicks per UTC calendar date across all links of an owner,
    /// within `[from, to]` inclusive. Dates without clicks are omitted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_by_day(
        &self,
        owner_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyCount>, AppError>;

    /// Counts clicks across all links of an owner within `[from, to)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count_between(
        &self,
        owner_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, AppError>;
}
