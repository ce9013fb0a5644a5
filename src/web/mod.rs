//! Demo web pages showing the middleware at work.
//!
//! Uses Askama templates for server-side rendering; the pages themselves
//! know nothing about tracking.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Demo route configuration

pub mod handlers;
pub mod routes;
