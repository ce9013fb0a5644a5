//! Application layer services implementing tracking logic.
//!
//! Services sit between the HTTP middleware and the sink: the middleware
//! decodes payloads, services decide whether and where events go.
//!
//! # Available Services
//!
//! - [`services::tracking_service::TrackingService`] - Exclusion checks and sink dispatch

pub mod services;
