//! Infrastructure layer for external integrations.
//!
//! Implements the [`crate::domain::sink::TrackingSink`] contract defined by
//! the domain layer.
//!
//! # Modules
//!
//! - [`sinks`] - No-op, logging, closure-backed and queued sinks

pub mod sinks;
