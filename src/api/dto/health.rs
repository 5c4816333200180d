//! DTOs for the health check endpoint.

use serde::Serialize;

/// Health status of a single component.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,
    pub message: String,
}

/// Per-component health breakdown.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    pub click_queue: CheckStatus,
}

/// Overall service health report.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}
