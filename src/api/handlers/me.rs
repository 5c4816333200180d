//! Handlers for the authenticated owner's link collection.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::links::LinkSummary;
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's links in creation order.
///
/// # Endpoint
///
/// `GET /me` (bearer token required)
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<Vec<LinkSummary>>, AppError> {
    let links = state.link_service.list_links(user_id).await?;

    Ok(Json(links.into_iter().map(LinkSummary::from).collect()))
}

/// Deactivates one of the caller's links.
///
/// Deactivation is independent of expiry and permanent from the visitor's
/// point of view: resolutions answer 410 Gone afterwards.
///
/// # Endpoint
///
/// `DELETE /me/{code}` (bearer token required)
///
/// # Errors
///
/// Returns 404 for an unknown code and 401 when the caller does not own
/// the link.
pub async fn deactivate_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.link_service.deactivate_link(&code, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
