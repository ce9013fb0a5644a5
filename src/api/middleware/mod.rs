//! HTTP middleware for request processing.
//!
//! Provides the tracking middleware itself plus rate limiting and
//! observability layers used by the demo server.

pub mod rate_limit;
pub mod seamlink;
pub mod tracing;
