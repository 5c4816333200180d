//! DTOs for the link issuance endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{TimestampSeconds, serde_as};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to issue a short link.
///
/// `expiry_date` is accepted as unix seconds to match the public contract;
/// `token` is optional and an invalid token downgrades the request to an
/// anonymous issuance instead of failing it.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Optional custom short code (pattern-checked by the issuance service).
    pub custom_code: Option<String>,

    /// Optional expiry instant, unix seconds.
    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    #[serde(default)]
    pub expiry_date: Option<DateTime<Utc>>,

    /// When true, the link self-destructs after its first resolution.
    #[serde(default)]
    pub view_once: Option<bool>,

    /// Optional bearer token associating the link with an account.
    pub token: Option<String>,
}

/// Issued link as returned to the client.
///
/// Carries the bare short code; clients join it with their configured
/// base URL to display the full short link.
#[serde_as]
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,

    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_once: Option<bool>,
}

impl From<Link> for ShortenResponse {
    fn from(link: Link) -> Self {
        Self {
            short_code: link.code,
            original_url: link.target_url,
            clicks: link.click_count,
            created_at: link.created_at,
            expiry_date: link.expires_at,
            view_once: link.view_once.then_some(true),
        }
    }
}
