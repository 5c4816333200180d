//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with its lifecycle metadata.
///
/// The `code` is globally unique and immutable once created. `click_count`
/// is denormalized from the click event history for fast reads and is only
/// ever incremented together with an appended event.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    /// Owning account, `None` for anonymously issued links.
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    /// When true, the link becomes inert after its first successful resolution.
    pub view_once: bool,
    /// Manual deactivation flag, independent of expiry.
    pub active: bool,
    /// Set once when a `view_once` link is consumed.
    pub consumed_at: Option<DateTime<Utc>>,
    pub click_count: i64,
}

impl Link {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        code: String,
        target_url: String,
        owner_id: Option<i64>,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
        view_once: bool,
        active: bool,
        consumed_at: Option<DateTime<Utc>>,
        click_count: i64,
    ) -> Self {
        Self {
            id,
            code,
            target_url,
            owner_id,
            created_at,
            expires_at,
            view_once,
            active,
            consumed_at,
            click_count,
        }
    }

    /// Returns true if the link has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }

    /// Returns true if a `view_once` link has already been consumed.
    pub fn is_consumed(&self) -> bool {
        self.view_once && self.consumed_at.is_some()
    }

    /// Returns true if the given account owns this link.
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == Some(user_id)
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
    pub owner_id: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub view_once: bool,
}
