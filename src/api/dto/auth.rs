//! DTOs for registration and login endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credentials for registration and login.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Bearer token issued on successful registration or login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
