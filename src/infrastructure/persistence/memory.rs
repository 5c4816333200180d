//! In-memory implementation of all repository traits.
//!
//! One mutex guards the whole store, so every multi-step mutation (counter
//! increment plus event append, consume check-and-set, check-and-insert)
//! is a single critical section with the same atomicity the PostgreSQL
//! implementations get from transactions and conditional updates.
//!
//! Used by the integration test suite and suitable for ephemeral embedded
//! deployments; nothing survives a restart.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::domain::entities::{Click, Link, NewClick, NewLink, NewUser, User};
use crate::domain::repositories::{ClickRepository, DailyCount, LinkRepository, UserRepository};
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    links: Vec<Link>,
    clicks: Vec<Click>,
    users: Vec<User>,
    next_link_id: i64,
    next_click_id: i64,
    next_user_id: i64,
}

/// In-memory store implementing [`LinkRepository`], [`ClickRepository`],
/// and [`UserRepository`] behind one lock.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");

        if inner.links.iter().any(|l| l.code == new_link.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_code_key" }),
            ));
        }

        inner.next_link_id += 1;
        let link = Link::new(
            inner.next_link_id,
            new_link.code,
            new_link.target_url,
            new_link.owner_id,
            Utc::now(),
            new_link.expires_at,
            new_link.view_once,
            true,
            None,
            0,
        );
        inner.links.push(link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner.links.iter().find(|l| l.code == code).cloned())
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        let inner = self.inner.lock().expect("store lock poisoned");

        // Insertion order is creation order.
        Ok(inner
            .links
            .iter()
            .filter(|l| l.owner_id == Some(owner_id))
            .cloned()
            .collect())
    }

    async fn try_consume(&self, code: &str) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");

        match inner
            .links
            .iter_mut()
            .find(|l| l.code == code && l.view_once && l.consumed_at.is_none())
        {
            Some(link) => {
                link.consumed_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn deactivate(&self, code: &str, owner_id: i64) -> Result<(), AppError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");

        let link = inner
            .links
            .iter_mut()
            .find(|l| l.code == code)
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "code": code }))
            })?;

        if link.owner_id != Some(owner_id) {
            return Err(AppError::unauthorized(
                "You do not own this link",
                json!({ "code": code }),
            ));
        }

        link.active = false;
        Ok(())
    }
}

#[async_trait]
impl ClickRepository for MemoryStore {
    async fn record_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");

        inner.next_click_id += 1;
        let id = inner.next_click_id;

        let link = inner
            .links
            .iter_mut()
            .find(|l| l.id == new_click.link_id)
            .ok_or_else(|| {
                AppError::not_found("Link not found", json!({ "link_id": new_click.link_id }))
            })?;
        link.click_count += 1;

        let click = Click::new(
            id,
            new_click.link_id,
            Utc::now(),
            new_click.ip,
            new_click.user_agent,
            new_click.referer,
            new_click.country,
        );
        inner.clicks.push(click.clone());

        Ok(click)
    }

    async fn count_by_day(
        &self,
        owner_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyCount>, AppError> {
        let inner = self.inner.lock().expect("store lock poisoned");

        let owned: Vec<i64> = inner
            .links
            .iter()
            .filter(|l| l.owner_id == Some(owner_id))
            .map(|l| l.id)
            .collect();

        let mut buckets: BTreeMap<NaiveDate, i64> = BTreeMap::new();
        for click in &inner.clicks {
            let date = click.clicked_at.date_naive();
            if owned.contains(&click.link_id) && date >= from && date <= to {
                *buckets.entry(date).or_insert(0) += 1;
            }
        }

        Ok(buckets
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect())
    }

    async fn count_between(
        &self,
        owner_id: i64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, AppError> {
        let inner = self.inner.lock().expect("store lock poisoned");

        let owned: Vec<i64> = inner
            .links
            .iter()
            .filter(|l| l.owner_id == Some(owner_id))
            .map(|l| l.id)
            .collect();

        Ok(inner
            .clicks
            .iter()
            .filter(|c| owned.contains(&c.link_id) && c.clicked_at >= from && c.clicked_at < to)
            .count() as i64)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut inner = self.inner.lock().expect("store lock poisoned");

        if inner.users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_email_key" }),
            ));
        }

        inner.next_user_id += 1;
        let user = User::new(
            inner.next_user_id,
            new_user.email,
            new_user.password_hash,
            Utc::now(),
        );
        inner.users.push(user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }
}
