//! # Seamlink
//!
//! Axum middleware that records page visits and outbound link clicks.
//!
//! The middleware does two things:
//!
//! - Answers the reserved endpoints `POST /api/seamlink/pageview` and
//!   `POST /api/seamlink/track` by decoding the JSON report and handing it
//!   to a [`domain::sink::TrackingSink`]
//! - Inserts a small script before `</body>` of every HTML response; the
//!   script reports the page visit and intercepts clicks on absolute links
//!
//! Storage is not part of this crate. Plug a sink in through
//! [`state::TrackingConfig`].
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Event models and the sink trait
//! - **Application Layer** ([`application`]) - Exclusion checks and dispatch
//! - **Infrastructure Layer** ([`infrastructure`]) - Reference sinks
//! - **API Layer** ([`api`]) - The middleware, tracking handlers, health/info endpoints
//! - **Web Layer** ([`web`]) - Demo pages
//!
//! ## Usage
//!
//! ```rust,ignore
//! use seamlink::prelude::*;
//!
//! let sink = FnSink::new().on_link_click(|click| async move {
//!     println!("outbound click to {}", click.url);
//!     Ok(())
//! });
//!
//! let seamlink = Seamlink::new(
//!     TrackingConfig::new(Arc::new(sink)).with_excluded_domains(["internal.example.com"]),
//! );
//!
//! let app = attach(Router::new().route("/", get(index)), seamlink);
//! ```
//!
//! ## Configuration
//!
//! The bundled demo server reads its settings from environment variables via
//! [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::{Seamlink, TrackingConfig};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::handlers::track::{CLICK_PATH, PAGEVIEW_PATH};
    pub use crate::api::middleware::seamlink::{attach, layer};
    pub use crate::domain::events::{LinkClick, PageVisit, TrackingEvent};
    pub use crate::domain::sink::{SinkError, TrackingSink};
    pub use crate::error::AppError;
    pub use crate::infrastructure::sinks::{FnSink, LogSink, NullSink, QueuedSink};
    pub use crate::state::{Seamlink, TrackingConfig};
    pub use crate::utils::tracking_script::TRACKING_SCRIPT;
}
