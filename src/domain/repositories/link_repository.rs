//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// The store is the single source of truth for code uniqueness and for
/// one-time-view consumption. Both are enforced with atomic conditional
/// writes rather than read-then-write sequences.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - in-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link.
    ///
    /// The uniqueness check and the insert are a single atomic operation;
    /// two concurrent creates for the same code cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code already exists.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists all links owned by an account, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError>;

    /// Atomically consumes a `view_once` link.
    ///
    /// Conditional update: succeeds only if the link is `view_once` and not
    /// yet consumed. Under N concurrent callers exactly one receives
    /// `Ok(true)`; the rest receive `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn try_consume(&self, code: &str) -> Result<bool, AppError>;

    /// Deactivates a link on behalf of its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::Unauthorized`] if `owner_id` does not own the link.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn deactivate(&self, code: &str, owner_id: i64) -> Result<(), AppError>;
}
