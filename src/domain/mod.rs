//! Domain layer containing tracking events and the sink contract.
//!
//! Nothing here depends on axum or on any concrete sink; the middleware
//! and the infrastructure layer both build on these types.
//!
//! # Modules
//!
//! - [`events`] - Page visit and link click models, payload decoding
//! - [`sink`] - [`sink::TrackingSink`] trait implemented by event destinations

pub mod events;
pub mod sink;
