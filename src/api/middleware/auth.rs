//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Account id of the authenticated caller, injected as a request extension
/// once the bearer token has been verified.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub i64);

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from the `Authorization` header
/// 2. Verify the token signature and expiry
/// 3. Insert [`CurrentUser`] into request extensions
/// 4. Continue to the next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is forged or expired
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user_id = st.auth_service.verify_token(&token)?;

    parts.extensions.insert(CurrentUser(user_id));
    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}
