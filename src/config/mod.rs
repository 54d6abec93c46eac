//! Configuration module for the office locations service.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// How often the list view refetches
    pub poll_interval: Duration,
    /// How long a success banner stays up
    pub banner_timeout: Duration,
    /// Answer 404 when deleting an unknown id instead of 200
    pub strict_delete: bool,
    /// Start the store with the default records
    pub seed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            poll_interval: Duration::from_millis(1500),
            banner_timeout: Duration::from_millis(5000),
            strict_delete: false,
            seed: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let bind_addr = env::var("OFFICES_BIND_ADDR")
            .map(|addr| addr.parse().expect("Invalid OFFICES_BIND_ADDR format"))
            .unwrap_or(defaults.bind_addr);

        let log_level = env::var("OFFICES_LOG_LEVEL").unwrap_or(defaults.log_level);

        let poll_interval =
            millis_var("OFFICES_POLL_INTERVAL_MS").unwrap_or(defaults.poll_interval);

        let banner_timeout =
            millis_var("OFFICES_BANNER_TIMEOUT_MS").unwrap_or(defaults.banner_timeout);

        let strict_delete = bool_var("OFFICES_STRICT_DELETE").unwrap_or(defaults.strict_delete);

        let seed = bool_var("OFFICES_SEED").unwrap_or(defaults.seed);

        Self {
            bind_addr,
            log_level,
            poll_interval,
            banner_timeout,
            strict_delete,
            seed,
        }
    }

    /// Timing settings for a list view.
    pub fn view_config(&self) -> ViewConfig {
        ViewConfig {
            poll_interval: self.poll_interval,
            banner_timeout: self.banner_timeout,
        }
    }
}

/// Timing settings for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    pub poll_interval: Duration,
    pub banner_timeout: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Config::default().view_config()
    }
}

fn millis_var(name: &str) -> Option<Duration> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
        _ => {
            tracing::warn!("Ignoring invalid {}={:?}", name, raw);
            None
        }
    }
}

fn bool_var(name: &str) -> Option<bool> {
    let raw = env::var(name).ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!("Ignoring invalid {}={:?}", name, raw);
            None
        }
    }
}
