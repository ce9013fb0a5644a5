//! Helpers shared by the middleware and the CLI.
//!
//! - [`extract_domain`] - host extraction and exclusion-list matching
//! - [`html_injector`] - content-type checks and `</body>` injection
//! - [`tracking_script`] - the client-side script itself

pub mod extract_domain;
pub mod html_injector;
pub mod tracking_script;
