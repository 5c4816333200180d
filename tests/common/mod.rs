#![allow(dead_code)]

use std::sync::Arc;

use tokio::sync::mpsc;

use shorty::application::services::{
    AnalyticsService, AuthService, CreateLink, LinkService, ResolverService,
};
use shorty::domain::click_event::ClickEvent;
use shorty::domain::entities::Link;
use shorty::infrastructure::persistence::MemoryStore;
use shorty::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

/// Builds an [`AppState`] over a shared in-memory store.
///
/// Returns the state, the receiver side of the click queue (so tests can
/// observe enqueued click events), and the store itself for direct setup
/// and inspection.
pub fn create_test_state() -> (AppState, mpsc::Receiver<ClickEvent>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let (tx, rx) = mpsc::channel(100);

    let link_service = Arc::new(LinkService::new(store.clone(), 6, 10));
    let resolver_service = Arc::new(ResolverService::new(store.clone()));
    let analytics_service = Arc::new(AnalyticsService::new(store.clone(), store.clone()));
    let auth_service = Arc::new(AuthService::new(store.clone(), TEST_JWT_SECRET.to_string()));

    let state = AppState::new(
        link_service,
        resolver_service,
        analytics_service,
        auth_service,
        store.clone(),
        tx,
        false,
    );

    (state, rx, store)
}

/// Registers an account and returns `(user_id, bearer_token)`.
pub async fn register_user(state: &AppState, email: &str) -> (i64, String) {
    let (user, token) = state
        .auth_service
        .register(email, "correct-horse")
        .await
        .expect("registration failed");

    (user.id, token)
}

/// Issues a link through the service layer.
pub async fn create_link(state: &AppState, url: &str, owner_id: Option<i64>) -> Link {
    state
        .link_service
        .create_link(CreateLink {
            target_url: url.to_string(),
            owner_id,
            ..Default::default()
        })
        .await
        .expect("link creation failed")
}
