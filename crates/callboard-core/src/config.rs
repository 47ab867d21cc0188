//! Application configuration
//!
//! Centralized configuration management using the `config` crate.
//! Configuration can be loaded from environment variables and config files.
//!
//! The access flag and the phone identifier that scope the call history are
//! injected here instead of being read from ambient session storage.

use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub access: AccessConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// HTTP server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Comma separated list of allowed CORS origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9002
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_cors_origins() -> String {
    "http://localhost:3000,http://127.0.0.1:3000".to_string()
}

/// Upstream calls API configuration
#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    /// Calls API endpoint
    #[serde(default)]
    pub url: String,

    /// Bearer token sent in the Authorization header
    #[serde(default)]
    pub token: String,

    /// Request timeout in seconds
    #[serde(default = "default_upstream_timeout")]
    pub timeout_secs: u64,

    /// Read the record array from this JSON file instead of calling `url`
    pub file: Option<String>,
}

fn default_upstream_timeout() -> u64 {
    30
}

/// Access scoping for the call views
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AccessConfig {
    /// Whether the voice-agent call views are enabled for this deployment
    #[serde(default)]
    pub retell_enabled: bool,

    /// Phone identifier whose calls are fetched
    #[serde(default)]
    pub user_phone_id: String,
}

/// Analytics and pagination tuning
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Local calendar used for month and day buckets
    #[serde(default = "default_timezone")]
    pub timezone: Tz,

    /// Rows per history page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Maximum page-number buttons shown at once
    #[serde(default = "default_max_page_buttons")]
    pub max_page_buttons: usize,

    /// Entries of the per-call cost chart shown on the dashboard
    #[serde(default = "default_cost_sample_display")]
    pub cost_sample_display: usize,

    /// Age in seconds after which the held snapshot is refetched
    #[serde(default = "default_snapshot_ttl")]
    pub snapshot_ttl_secs: u64,
}

fn default_timezone() -> Tz {
    Tz::Europe__Madrid
}

fn default_page_size() -> usize {
    50
}

fn default_max_page_buttons() -> usize {
    10
}

fn default_cost_sample_display() -> usize {
    20
}

fn default_snapshot_ttl() -> u64 {
    300
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            page_size: default_page_size(),
            max_page_buttons: default_max_page_buttons(),
            cost_sample_display: default_cost_sample_display(),
            snapshot_ttl_secs: default_snapshot_ttl(),
        }
    }
}

/// Logging output configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// Fallback level when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and optional config file
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 9002)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("server.cors_origins", default_cors_origins())?
            .set_default("upstream.url", "")?
            .set_default("upstream.token", "")?
            .set_default("upstream.timeout_secs", 30)?
            .set_default("access.retell_enabled", false)?
            .set_default("access.user_phone_id", "")?
            .set_default("analytics.timezone", "Europe/Madrid")?
            .set_default("analytics.page_size", 50)?
            .set_default("analytics.max_page_buttons", 10)?
            .set_default("analytics.cost_sample_display", 20)?
            .set_default("analytics.snapshot_ttl_secs", 300)?
            .set_default("log.level", "info")?
            .set_default("log.json", false)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables with CALLBOARD_ prefix
            .add_source(
                Environment::with_prefix("CALLBOARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get the server bind address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
