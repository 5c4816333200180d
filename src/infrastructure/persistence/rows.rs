//! Row types mapping database results onto domain entities.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::entities::{Click, Link, User};

#[derive(FromRow)]
pub(super) struct LinkRow {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub owner_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub view_once: bool,
    pub active: bool,
    pub consumed_at: Option<DateTime<Utc>>,
    pub click_count: i64,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(
            r.id,
            r.code,
            r.target_url,
            r.owner_id,
            r.created_at,
            r.expires_at,
            r.view_once,
            r.active,
            r.consumed_at,
            r.click_count,
        )
    }
}

#[derive(FromRow)]
pub(super) struct ClickRow {
    pub id: i64,
    pub link_id: i64,
    pub clicked_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub country: Option<String>,
}

impl From<ClickRow> for Click {
    fn from(r: ClickRow) -> Self {
        Click::new(
            r.id,
            r.link_id,
            r.clicked_at,
            r.ip,
            r.user_agent,
            r.referer,
            r.country,
        )
    }
}

#[derive(FromRow)]
pub(super) struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User::new(r.id, r.email, r.password_hash, r.created_at)
    }
}
