//! Handler for the link issuance endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::CreateLink;
use crate::error::AppError;
use crate::state::AppState;

/// Issues a short link.
///
/// # Endpoint
///
/// `POST /new`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/some/long/path",
///   "custom_code": "promo-2026",      // optional
///   "expiry_date": 1767225600,        // optional, unix seconds
///   "view_once": true,                // optional
///   "token": "<bearer token>"         // optional
/// }
/// ```
///
/// # Ownership
///
/// A valid `token` associates the link with the caller's account. An
/// invalid or expired token does not fail the request; the link is issued
/// anonymously instead.
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed URL or alias and
/// 409 Conflict when a custom code is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let owner_id = payload
        .token
        .as_deref()
        .and_then(|token| state.auth_service.verify_token(token).ok());

    let link = state
        .link_service
        .create_link(CreateLink {
            target_url: payload.original_url,
            custom_code: payload.custom_code,
            owner_id,
            expires_at: payload.expiry_date,
            view_once: payload.view_once.unwrap_or(false),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}
