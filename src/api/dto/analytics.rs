//! DTOs for the dashboard analytics endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::dto::links::LinkSummary;
use crate::application::services::{Growth, Trend};
use crate::domain::repositories::DailyCount;

/// Query parameters for the analytics endpoint.
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    /// Histogram window in days; defaults to 7, clamped to 1-90.
    pub days: Option<u32>,
}

/// One histogram bucket: clicks on a single UTC calendar date.
#[derive(Debug, Serialize)]
pub struct HistogramPoint {
    pub date: NaiveDate,
    pub clicks: i64,
}

impl From<DailyCount> for HistogramPoint {
    fn from(d: DailyCount) -> Self {
        Self {
            date: d.date,
            clicks: d.count,
        }
    }
}

/// Week-over-week click volume comparison.
#[derive(Debug, Serialize)]
pub struct GrowthSummary {
    pub current_window_clicks: i64,
    pub previous_window_clicks: i64,
    pub rate_percent: f64,
    pub trend: Trend,
}

impl From<Growth> for GrowthSummary {
    fn from(g: Growth) -> Self {
        Self {
            current_window_clicks: g.current_window,
            previous_window_clicks: g.previous_window,
            rate_percent: g.rate_percent,
            trend: g.trend,
        }
    }
}

/// Full dashboard analytics payload.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub histogram: Vec<HistogramPoint>,
    pub growth: GrowthSummary,
    pub top_link: Option<LinkSummary>,
}
