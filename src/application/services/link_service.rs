//! Link issuance and owner-facing link management.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_normalizer::normalize_url;

/// Parameters for issuing a new short link.
#[derive(Debug, Clone, Default)]
pub struct CreateLink {
    pub target_url: String,
    pub custom_code: Option<String>,
    pub owner_id: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub view_once: bool,
}

/// Service for creating and managing shortened links.
///
/// Handles URL normalization, code generation/validation, and collision
/// retries. Uniqueness itself is enforced by the store's atomic
/// check-and-insert; this service only reacts to conflicts.
pub struct LinkService {
    links: Arc<dyn LinkRepository>,
    code_length: usize,
    max_attempts: usize,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// # Arguments
    ///
    /// - `code_length` - length of generated codes (bounded at config load)
    /// - `max_attempts` - collision retry bound for generated codes
    pub fn new(links: Arc<dyn LinkRepository>, code_length: usize, max_attempts: usize) -> Self {
        Self {
            links,
            code_length,
            max_attempts,
        }
    }

    /// Issues a short link.
    ///
    /// # Code Selection
    ///
    /// - A custom code is validated and inserted as-is; a duplicate is a
    ///   conflict the caller may retry with a different alias.
    /// - Otherwise a random code is drawn and the insert retried on
    ///   collision up to the configured attempt bound.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed URL or alias,
    /// [`AppError::Conflict`] when a custom code is taken, and
    /// [`AppError::Internal`] when the retry bound is exhausted or the
    /// store fails.
    pub async fn create_link(&self, request: CreateLink) -> Result<Link, AppError> {
        let target_url = normalize_url(&request.target_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(custom) = request.custom_code {
            validate_custom_code(&custom)?;

            if self.links.find_by_code(&custom).await?.is_some() {
                return Err(AppError::conflict(
                    "Custom code already exists",
                    json!({ "code": custom }),
                ));
            }

            // The advisory lookup above gives a precise error message; the
            // store's unique constraint still decides races.
            return self
                .links
                .create(NewLink {
                    code: custom,
                    target_url,
                    owner_id: request.owner_id,
                    expires_at: request.expires_at,
                    view_once: request.view_once,
                })
                .await;
        }

        self.create_with_generated_code(
            target_url,
            request.owner_id,
            request.expires_at,
            request.view_once,
        )
        .await
    }

    /// Lists an owner's links in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_links(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        self.links.list_by_owner(owner_id).await
    }

    /// Deactivates a link on behalf of its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code and
    /// [`AppError::Unauthorized`] when the caller does not own the link.
    pub async fn deactivate_link(&self, code: &str, owner_id: i64) -> Result<(), AppError> {
        self.links.deactivate(code, owner_id).await
    }

    /// Draws random codes and inserts until one sticks or the bound is hit.
    async fn create_with_generated_code(
        &self,
        target_url: String,
        owner_id: Option<i64>,
        expires_at: Option<DateTime<Utc>>,
        view_once: bool,
    ) -> Result<Link, AppError> {
        for _ in 0..self.max_attempts {
            let code = generate_code(self.code_length);

            match self
                .links
                .create(NewLink {
                    code,
                    target_url: target_url.clone(),
                    owner_id,
                    expires_at,
                    view_once,
                })
                .await
            {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate a unique code",
            json!({ "attempts": self.max_attempts }),
        ))
    }
}
