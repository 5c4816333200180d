//! Handlers for account registration and login.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{CredentialsRequest, TokenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /register`
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed email or short password and
/// 409 Conflict when the email is already registered.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    payload.validate()?;

    let (_user, token) = state
        .auth_service
        .register(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Errors
///
/// Returns 401 Unauthorized for unknown email or wrong password; the two
/// cases are indistinguishable in the response.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    payload.validate()?;

    let token = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}
