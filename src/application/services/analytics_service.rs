//! Click analytics: daily histograms, growth windows, top-link ranking.
//!
//! All date bucketing uses UTC calendar dates. The aggregator is strictly
//! read-only over the click history and link set; it runs concurrently with
//! the click worker and never blocks it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};

use crate::domain::entities::Link;
use crate::domain::repositories::{ClickRepository, DailyCount, LinkRepository};
use crate::error::AppError;

/// Length of the growth comparison windows, in days.
const GROWTH_WINDOW_DAYS: u64 = 7;

/// Direction of click-volume change between adjacent windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

/// Click-volume comparison between the trailing window and the one before.
#[derive(Debug, Clone)]
pub struct Growth {
    /// Clicks in the trailing 7 days, including today.
    pub current_window: i64,
    /// Clicks in the 7 days preceding the current window.
    pub previous_window: i64,
    /// Percentage change; see [`AnalyticsService::growth`] for the rule.
    pub rate_percent: f64,
    pub trend: Trend,
}

/// Service computing dashboard analytics for an owner's links.
pub struct AnalyticsService {
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
}

impl AnalyticsService {
    pub fn new(links: Arc<dyn LinkRepository>, clicks: Arc<dyn ClickRepository>) -> Self {
        Self { links, clicks }
    }

    /// Per-day click counts over the trailing `window_days` days including
    /// today, zero-filled and ordered oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn daily_histogram(
        &self,
        owner_id: i64,
        window_days: u32,
    ) -> Result<Vec<DailyCount>, AppError> {
        let today = Utc::now().date_naive();
        let from = today
            .checked_sub_days(Days::new(window_days.saturating_sub(1) as u64))
            .unwrap_or(today);

        let sparse = self.clicks.count_by_day(owner_id, from, today).await?;
        let by_date: HashMap<NaiveDate, i64> =
            sparse.into_iter().map(|d| (d.date, d.count)).collect();

        let histogram = (0..window_days as u64)
            .filter_map(|offset| from.checked_add_days(Days::new(offset)))
            .map(|date| DailyCount {
                date,
                count: by_date.get(&date).copied().unwrap_or(0),
            })
            .collect();

        Ok(histogram)
    }

    /// Compares the trailing 7-day click count against the preceding 7 days.
    ///
    /// # Rate Rule
    ///
    /// - previous == 0 and current > 0: 100%
    /// - previous == 0 and current == 0: 0%
    /// - otherwise: (current - previous) / previous * 100
    ///
    /// The trend is the sign of the rate; neutral only when the rate is
    /// exactly zero (including the both-zero case).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn growth(&self, owner_id: i64) -> Result<Growth, AppError> {
        let now = Utc::now();
        let today = now.date_naive();

        let current_start = today
            .checked_sub_days(Days::new(GROWTH_WINDOW_DAYS - 1))
            .unwrap_or(today)
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid")
            .and_utc();
        let previous_start = today
            .checked_sub_days(Days::new(2 * GROWTH_WINDOW_DAYS - 1))
            .unwrap_or(today)
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid")
            .and_utc();

        let current_window = self
            .clicks
            .count_between(owner_id, current_start, now)
            .await?;
        let previous_window = self
            .clicks
            .count_between(owner_id, previous_start, current_start)
            .await?;

        let rate_percent = compute_rate(current_window, previous_window);
        let trend = if rate_percent > 0.0 {
            Trend::Positive
        } else if rate_percent < 0.0 {
            Trend::Negative
        } else {
            Trend::Neutral
        };

        Ok(Growth {
            current_window,
            previous_window,
            rate_percent,
            trend,
        })
    }

    /// The owner's most-clicked link.
    ///
    /// Ties on `click_count` are broken by earliest `created_at`; an owner
    /// with no links yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn top_link(&self, owner_id: i64) -> Result<Option<Link>, AppError> {
        let links = self.links.list_by_owner(owner_id).await?;

        Ok(links.into_iter().max_by(|a, b| {
            a.click_count
                .cmp(&b.click_count)
                .then_with(|| b.created_at.cmp(&a.created_at))
        }))
    }
}

fn compute_rate(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        if current > 0 { 100.0 } else { 0.0 }
    } else {
        (current - previous) as f64 / previous as f64 * 100.0
    }
}
