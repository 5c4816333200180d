//! DTOs for the owner-facing link listing.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_with::{TimestampSeconds, serde_as};

use crate::domain::entities::Link;

/// Owner's view of one of their links.
#[serde_as]
#[derive(Debug, Serialize)]
pub struct LinkSummary {
    pub short_code: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,

    #[serde_as(as = "Option<TimestampSeconds<i64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,

    pub view_once: bool,
    pub active: bool,
}

impl From<Link> for LinkSummary {
    fn from(link: Link) -> Self {
        Self {
            short_code: link.code,
            original_url: link.target_url,
            clicks: link.click_count,
            created_at: link.created_at,
            expiry_date: link.expires_at,
            view_once: link.view_once,
            active: link.active,
        }
    }
}
