//! HTTP layer: the tracking middleware and the demo server's API.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies for the JSON endpoints
//! - [`handlers`] - Tracking, health and info handlers
//! - [`middleware`] - Seamlink middleware, rate limiting and tracing layers
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
