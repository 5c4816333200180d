//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A click event recorded when a shortened link is resolved.
///
/// Click events are append-only history. They are never revised after
/// insertion; aggregation reads bucket them by UTC calendar date.
#[derive(Debug, Clone)]
pub struct Click {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    /// Two-letter country code, resolved out-of-band (e.g. by an edge proxy).
    pub country: Option<String>,
}

impl Click {
    pub fn new(
        id: i64,
        link_id: i64,
        clicked_at: DateTime<Utc>,
        ip: Option<String>,
        user_agent: Option<String>,
        referer: Option<String>,
        country: Option<String>,
    ) -> Self {
        Self {
            id,
            link_id,
            clicked_at,
            ip,
            user_agent,
            referer,
            country,
        }
    }
}

/// Input data for recording a new click event.
///
/// All client metadata is optional to handle missing headers gracefully.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub link_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub country: Option<String>,
}
