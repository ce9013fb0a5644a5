//! HTTP request handlers for API endpoints.

pub mod health;
pub mod info;
pub mod track;

pub use health::health_handler;
pub use info::info_handler;
pub use track::{click_handler, pageview_handler};
