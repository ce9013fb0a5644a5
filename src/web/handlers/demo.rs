//! Demo page handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template for the tracked demo page.
///
/// Renders `templates/index.html`: one outbound link that the injected
/// script intercepts.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: &'static str,
    pub outbound_url: &'static str,
}

/// Template for the referrer demo page.
///
/// Renders `templates/referrer.html`, which links back to the index page
/// so the visit event carries a same-site referrer.
#[derive(Template, WebTemplate)]
#[template(path = "referrer.html")]
pub struct ReferrerTemplate {
    pub title: &'static str,
}

/// Renders the tracked demo page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> impl IntoResponse {
    IndexTemplate {
        title: "Tracked Page",
        outbound_url: "https://github.com",
    }
}

/// Renders the referrer demo page.
///
/// # Endpoint
///
/// `GET /ref`
pub async fn referrer_handler() -> impl IntoResponse {
    ReferrerTemplate {
        title: "Referrer Page",
    }
}
