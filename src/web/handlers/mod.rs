//! HTML template rendering handlers for the demo pages.

mod demo;

pub use demo::{index_handler, referrer_handler};
