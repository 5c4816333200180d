//! Redirect decision state machine.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Terminal outcome of resolving a short code.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Redirect the visitor to the link's target URL.
    Redirect(Link),
    /// No link exists for this code.
    NotFound,
    /// The link was manually deactivated by its owner.
    Inactive,
    /// The link passed its expiry, or its one-time view was already consumed.
    Expired,
}

/// Service mapping an inbound short code to a redirect decision.
///
/// Decision order per request: not-found, inactive, expired, one-time
/// already consumed, redirect. For `view_once` links the consumption check
/// is a store-level conditional update, so under concurrent resolutions of
/// the same code exactly one caller obtains the redirect.
pub struct ResolverService {
    links: Arc<dyn LinkRepository>,
}

impl ResolverService {
    pub fn new(links: Arc<dyn LinkRepository>) -> Self {
        Self { links }
    }

    /// Resolves a short code to its terminal outcome.
    ///
    /// Click recording is the caller's responsibility and happens only for
    /// [`Resolution::Redirect`]; a failed or cancelled recording never
    /// revokes an already-decided redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<Resolution, AppError> {
        let Some(link) = self.links.find_by_code(code).await? else {
            return Ok(Resolution::NotFound);
        };

        if !link.active {
            return Ok(Resolution::Inactive);
        }

        if link.is_expired() {
            return Ok(Resolution::Expired);
        }

        if link.view_once && !self.links.try_consume(code).await? {
            // Some concurrent resolution already took the single view.
            return Ok(Resolution::Expired);
        }

        Ok(Resolution::Redirect(link))
    }
}
