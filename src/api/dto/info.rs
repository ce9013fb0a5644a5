//! DTO for the service info endpoint.

use serde::Serialize;

/// Static service description returned by `GET /api/info`.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub pageview_endpoint: &'static str,
    pub click_endpoint: &'static str,
}
