//! Demo page route configuration.

use crate::state::Seamlink;
use crate::web::handlers::{index_handler, referrer_handler};
use axum::{Router, routing::get};

/// Public demo pages. Both render HTML and therefore receive the script.
///
/// # Endpoints
///
/// - `GET /`    - Tracked page with an outbound link
/// - `GET /ref` - Page linking back to `/`
pub fn public_routes() -> Router<Seamlink> {
    Router::new()
        .route("/", get(index_handler))
        .route("/ref", get(referrer_handler))
}
