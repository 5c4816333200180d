//! Handler for short link resolution.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::net::SocketAddr;
use tracing::warn;

use crate::application::services::Resolution;
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Geo header set by edge proxies (Cloudflare convention).
const COUNTRY_HEADER: &str = "cf-ipcountry";

/// Resolves a short code and redirects to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Run the resolver state machine against the store
/// 2. On a redirect decision, enqueue a click event for the background
///    worker and answer `302 Found` immediately
/// 3. Terminal outcomes answer 404 (unknown code) or 410 Gone
///    (inactive, expired, or one-time view already consumed)
///
/// # Click Tracking
///
/// Click events go through a bounded channel; a full queue drops the event
/// (counted and logged) rather than delaying the visitor's redirect.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Response, AppError> {
    match state.resolver_service.resolve(&code).await? {
        Resolution::Redirect(link) => {
            let ip = client_ip(&headers, addr, state.behind_proxy);

            let event = ClickEvent::new(
                link.id,
                code,
                Some(ip),
                headers
                    .get(header::USER_AGENT)
                    .and_then(|v| v.to_str().ok()),
                headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
                headers.get(COUNTRY_HEADER).and_then(|v| v.to_str().ok()),
            );

            if let Err(e) = state.click_sender.try_send(event) {
                metrics::counter!("clicks_dropped_total").increment(1);
                warn!(error = %e, "click queue full, dropping event");
            }

            Ok((
                StatusCode::FOUND,
                [(header::LOCATION, link.target_url)],
            )
                .into_response())
        }
        Resolution::NotFound => Err(AppError::not_found(
            "Short link not found",
            json!({ "code": code }),
        )),
        Resolution::Inactive => Err(AppError::gone(
            "Link has been deactivated",
            json!({ "code": code }),
        )),
        Resolution::Expired => Err(AppError::gone(
            "Link has expired",
            json!({ "code": code }),
        )),
    }
}
