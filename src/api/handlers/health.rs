//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Probe key used for the database round-trip; contains characters the
/// alias rules forbid, so it can never collide with a real link.
const PROBE_CODE: &str = "__health__";

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: all components healthy
/// - **503 Service Unavailable**: one or more components degraded
///
/// # Components Checked
///
/// 1. **Database**: a store lookup round-trip
/// 2. **Click Queue**: channel open, with remaining capacity reported
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let db_check = check_database(&state).await;
    let queue_check = check_click_queue(&state);

    let all_healthy = db_check.status == "ok" && queue_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            database: db_check,
            click_queue: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks store connectivity with a lookup that is expected to miss.
async fn check_database(state: &AppState) -> CheckStatus {
    match state.links.find_by_code(PROBE_CODE).await {
        Ok(_) => CheckStatus {
            status: "ok".to_string(),
            message: "Connected".to_string(),
        },
        Err(e) => CheckStatus {
            status: "error".to_string(),
            message: e.to_string(),
        },
    }
}

/// Checks that the click queue is accepting events.
fn check_click_queue(state: &AppState) -> CheckStatus {
    if state.click_sender.is_closed() {
        CheckStatus {
            status: "error".to_string(),
            message: "Click queue closed".to_string(),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: format!("Capacity: {}", state.click_sender.capacity()),
        }
    }
}
