//! Demo server configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export LISTEN="127.0.0.1:3000"
//! export SEAMLINK_SINK="queued"
//! export SEAMLINK_EXCLUDED_DOMAINS="internal.example.com,intranet.local"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Rate limit on forwarded client IP (default: `false`)
//! - `SEAMLINK_SINK` - `log`, `null` or `queued` (default: `log`)
//! - `SEAMLINK_EXCLUDED_DOMAINS` - Comma-separated domains never forwarded to the sink
//! - `SEAMLINK_MAX_BODY_BYTES` - Buffering limit (default: 8388608, min: 1024, max: 268435456)
//! - `SEAMLINK_QUEUE_CAPACITY` - Queued sink buffer size (default: 10000, min: 100)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

use crate::state::DEFAULT_MAX_BODY_BYTES;

/// Which reference sink the demo server wires in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkKind {
    /// Log every event ([`crate::infrastructure::sinks::LogSink`]).
    Log,
    /// Discard every event ([`crate::infrastructure::sinks::NullSink`]).
    Null,
    /// Log from a background worker ([`crate::infrastructure::sinks::QueuedSink`]).
    Queued,
}

impl FromStr for SinkKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" => Ok(Self::Log),
            "null" | "none" => Ok(Self::Null),
            "queued" | "queue" => Ok(Self::Queued),
            other => anyhow::bail!("SEAMLINK_SINK must be 'log', 'null' or 'queued', got '{other}'"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub sink: SinkKind,
    /// Raw exclusion entries; normalized when the middleware is built.
    pub excluded_domains: Vec<String>,
    /// Largest tracking payload or HTML body buffered by the middleware.
    pub max_body_bytes: usize,
    /// Buffer size of the queued sink. Ignored by other sinks.
    pub queue_capacity: usize,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SEAMLINK_SINK` names an unknown sink, or if
    /// `SEAMLINK_MAX_BODY_BYTES` / `SEAMLINK_QUEUE_CAPACITY` is not a number.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let sink = match env::var("SEAMLINK_SINK") {
            Ok(v) => v.parse()?,
            Err(_) => SinkKind::Log,
        };

        let excluded_domains = env::var("SEAMLINK_EXCLUDED_DOMAINS")
            .map(|v| parse_domain_list(&v))
            .unwrap_or_default();

        let max_body_bytes = match env::var("SEAMLINK_MAX_BODY_BYTES") {
            Ok(v) => v
                .trim()
                .parse()
                .with_context(|| format!("SEAMLINK_MAX_BODY_BYTES must be a number, got '{v}'"))?,
            Err(_) => DEFAULT_MAX_BODY_BYTES,
        };

        let queue_capacity = match env::var("SEAMLINK_QUEUE_CAPACITY") {
            Ok(v) => v
                .trim()
                .parse()
                .with_context(|| format!("SEAMLINK_QUEUE_CAPACITY must be a number, got '{v}'"))?,
            Err(_) => 10_000,
        };

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            sink,
            excluded_domains,
            max_body_bytes,
            queue_capacity,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `max_body_bytes` is outside 1 KiB..=256 MiB
    /// - `queue_capacity` is outside 100..=1000000
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.max_body_bytes < 1024 {
            anyhow::bail!(
                "SEAMLINK_MAX_BODY_BYTES must be at least 1024, got {}",
                self.max_body_bytes
            );
        }

        if self.max_body_bytes > 256 * 1024 * 1024 {
            anyhow::bail!(
                "SEAMLINK_MAX_BODY_BYTES is too large (max: 268435456), got {}",
                self.max_body_bytes
            );
        }

        if self.queue_capacity < 100 || self.queue_capacity > 1_000_000 {
            anyhow::bail!(
                "SEAMLINK_QUEUE_CAPACITY must be between 100 and 1000000, got {}",
                self.queue_capacity
            );
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Sink: {:?}", self.sink);
        if self.sink == SinkKind::Queued {
            tracing::info!("  Queue capacity: {}", self.queue_capacity);
        }
        if self.excluded_domains.is_empty() {
            tracing::info!("  Excluded domains: none");
        } else {
            tracing::info!("  Excluded domains: {}", self.excluded_domains.join(", "));
        }
        tracing::info!("  Max body bytes: {}", self.max_body_bytes);
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Splits a comma-separated domain list, dropping blank entries.
fn parse_domain_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable is malformed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn valid_config() -> Config {
        Config {
            listen_addr: "0.0.0.0:3000".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            behind_proxy: false,
            sink: SinkKind::Log,
            excluded_domains: vec![],
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            queue_capacity: 10_000,
        }
    }

    #[test]
    fn test_parse_domain_list() {
        assert_eq!(
            parse_domain_list(" internal.example.com, ,intranet.local ,"),
            vec!["internal.example.com", "intranet.local"]
        );
        assert!(parse_domain_list("").is_empty());
    }

    #[test]
    fn test_sink_kind_from_str() {
        assert_eq!("log".parse::<SinkKind>().unwrap(), SinkKind::Log);
        assert_eq!("NULL".parse::<SinkKind>().unwrap(), SinkKind::Null);
        assert_eq!(" queued ".parse::<SinkKind>().unwrap(), SinkKind::Queued);
        assert!("postgres".parse::<SinkKind>().is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = valid_config();
        assert!(config.validate().is_ok());

        config.log_format = "invalid".to_string();
        assert!(config.validate().is_err());

        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.listen_addr = "3000".to_string();
        assert!(config.validate().is_err());

        config.listen_addr = "127.0.0.1:3000".to_string();

        config.max_body_bytes = 512;
        assert!(config.validate().is_err());

        config.max_body_bytes = 512 * 1024 * 1024;
        assert!(config.validate().is_err());

        config.max_body_bytes = DEFAULT_MAX_BODY_BYTES;

        config.queue_capacity = 50;
        assert!(config.validate().is_err());

        config.queue_capacity = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::remove_var("LISTEN");
            env::remove_var("SEAMLINK_SINK");
            env::remove_var("SEAMLINK_EXCLUDED_DOMAINS");
            env::remove_var("SEAMLINK_MAX_BODY_BYTES");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.sink, SinkKind::Log);
        assert!(config.excluded_domains.is_empty());
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("SEAMLINK_SINK", "queued");
            env::set_var("SEAMLINK_EXCLUDED_DOMAINS", "internal.example.com,corp.local");
            env::set_var("SEAMLINK_MAX_BODY_BYTES", "65536");
            env::set_var("BEHIND_PROXY", "1");
        }

        let config = Config::from_env().unwrap();

        assert_eq!(config.sink, SinkKind::Queued);
        assert_eq!(
            config.excluded_domains,
            vec!["internal.example.com", "corp.local"]
        );
        assert_eq!(config.max_body_bytes, 65536);
        assert!(config.behind_proxy);

        // Cleanup
        unsafe {
            env::remove_var("SEAMLINK_SINK");
            env::remove_var("SEAMLINK_EXCLUDED_DOMAINS");
            env::remove_var("SEAMLINK_MAX_BODY_BYTES");
            env::remove_var("BEHIND_PROXY");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_unknown_sink() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("SEAMLINK_SINK", "redis");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("SEAMLINK_SINK");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric_limits() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("SEAMLINK_MAX_BODY_BYTES", "8MB");
        }
        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("SEAMLINK_MAX_BODY_BYTES");
            env::set_var("SEAMLINK_QUEUE_CAPACITY", "lots");
        }
        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("SEAMLINK_QUEUE_CAPACITY");
        }
    }
}
