//! Handler for the dashboard analytics endpoint.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::api::dto::analytics::{AnalyticsQuery, AnalyticsResponse, HistogramPoint};
use crate::api::dto::links::LinkSummary;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Default histogram window in days.
const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Largest accepted histogram window in days.
const MAX_WINDOW_DAYS: u32 = 90;

/// Computes dashboard analytics for the caller's links.
///
/// # Endpoint
///
/// `GET /me/analytics?days=N` (bearer token required)
///
/// # Response
///
/// ```json
/// {
///   "histogram": [{"date": "2026-08-01", "clicks": 3}, ...],
///   "growth": {
///     "current_window_clicks": 5,
///     "previous_window_clicks": 0,
///     "rate_percent": 100.0,
///     "trend": "positive"
///   },
///   "top_link": { "short_code": "abc123", ... }
/// }
/// ```
///
/// The histogram covers the trailing `days` days including today (UTC),
/// zero-filled and ordered oldest first. Growth always compares the
/// trailing 7 days against the 7 before, regardless of `days`.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let days = query
        .days
        .unwrap_or(DEFAULT_WINDOW_DAYS)
        .clamp(1, MAX_WINDOW_DAYS);

    let histogram = state
        .analytics_service
        .daily_histogram(user_id, days)
        .await?;
    let growth = state.analytics_service.growth(user_id).await?;
    let top_link = state.analytics_service.top_link(user_id).await?;

    Ok(Json(AnalyticsResponse {
        histogram: histogram.into_iter().map(HistogramPoint::from).collect(),
        growth: growth.into(),
        top_link: top_link.map(LinkSummary::from),
    }))
}
