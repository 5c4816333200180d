//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET    /{code}`        - Short link redirect (public)
//! - `GET    /health`        - Health check: store, click queue (public)
//! - `POST   /new`           - Issue a short link (public, optional token in body)
//! - `POST   /register`      - Create an account, returns a bearer token
//! - `POST   /login`         - Exchange credentials for a bearer token
//! - `GET    /me`            - List own links (Bearer token required)
//! - `GET    /me/analytics`  - Dashboard analytics (Bearer token required)
//! - `DELETE /me/{code}`     - Deactivate an own link (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **Rate limiting** - per-IP token bucket (proxy-aware when configured)
//! - **Authentication** - Bearer token on the `/me` group
//! - **Path normalization** - trailing slash handling

use axum::routing::{delete, get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api::handlers::{
    analytics_handler, deactivate_handler, health_handler, login_handler, me_handler,
    redirect_handler, register_handler, shorten_handler,
};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads the client IP from
///   `X-Forwarded-For` / `X-Real-IP` instead of the peer socket address;
///   enable only behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let protected = Router::new()
        .route("/me", get(me_handler))
        .route("/me/analytics", get(analytics_handler))
        .route("/me/{code}", delete(deactivate_handler))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let public = Router::new()
        .route("/new", post(shorten_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/{code}", get(redirect_handler));

    let limited = with_rate_limit(protected.merge(public), behind_proxy);

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(limited)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Applies the per-IP rate limiter matching the deployment topology.
fn with_rate_limit(router: Router<AppState>, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        router.layer(rate_limit::proxy_layer())
    } else {
        router.layer(rate_limit::layer())
    }
}
