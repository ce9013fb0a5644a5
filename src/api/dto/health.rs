//! DTOs for health check endpoint.

use serde::Serialize;

/// Overall service health with per-component checks.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Individual component checks.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub sink: CheckStatus,
}

/// Result of a single component check.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
