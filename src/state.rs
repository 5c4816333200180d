//! Shared application state injected into all handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{AnalyticsService, AuthService, LinkService, ResolverService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Application state shared across request handlers.
///
/// Cheap to clone: services are behind `Arc` and the click sender is a
/// channel handle.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub resolver_service: Arc<ResolverService>,
    pub analytics_service: Arc<AnalyticsService>,
    pub auth_service: Arc<AuthService>,
    /// Link store handle used by the health check probe.
    pub links: Arc<dyn LinkRepository>,
    /// Producer side of the click queue drained by the background worker.
    pub click_sender: mpsc::Sender<ClickEvent>,
    /// When true, client IPs are read from proxy headers for click metadata.
    pub behind_proxy: bool,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        resolver_service: Arc<ResolverService>,
        analytics_service: Arc<AnalyticsService>,
        auth_service: Arc<AuthService>,
        links: Arc<dyn LinkRepository>,
        click_sender: mpsc::Sender<ClickEvent>,
        behind_proxy: bool,
    ) -> Self {
        Self {
            link_service,
            resolver_service,
            analytics_service,
            auth_service,
            links,
            click_sender,
            behind_proxy,
        }
    }
}
