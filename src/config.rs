//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Optional values that fail to parse fall
//! back to their defaults; only the API key is mandatory.

use std::net::SocketAddr;
use std::time::Duration;

use chrono::{NaiveTime, TimeDelta};

use crate::background::SweepPolicy;
use crate::error::GatewayError;
use crate::upstream::MatchWindow;
use crate::upstream::riot_client::DEFAULT_BASE_URL;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3001`).
    pub listen_addr: SocketAddr,

    /// PostgreSQL connection string.
    pub database_url: String,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Minimum idle connections in the pool.
    pub database_min_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// Use PostgreSQL when `true`, the in-memory store otherwise.
    pub persistence_enabled: bool,

    /// Credential attached to every upstream call.
    pub riot_api_key: String,

    /// Upstream base URL template containing a `{host}` placeholder.
    pub riot_api_base_url: String,

    /// Per-request upstream timeout.
    pub upstream_timeout: Duration,

    /// Match-id pagination window.
    pub match_window: MatchWindow,

    /// Whether the expiry sweeper runs.
    pub sweep_enabled: bool,

    /// Expiry sweeper thresholds and schedule.
    pub sweep_policy: SweepPolicy,

    /// Log output format.
    pub log_format: LogFormat,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("listen_addr", &self.listen_addr)
            .field("persistence_enabled", &self.persistence_enabled)
            .field("database_max_connections", &self.database_max_connections)
            .field("riot_api_base_url", &self.riot_api_base_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("match_window", &self.match_window)
            .field("sweep_enabled", &self.sweep_enabled)
            .field("sweep_policy", &self.sweep_policy)
            .field("log_format", &self.log_format)
            .finish_non_exhaustive()
    }
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if `RIOT_API_KEY` is missing or
    /// `LISTEN_ADDR` cannot be parsed as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, GatewayError> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3001".to_string())
            .parse()
            .map_err(|e| GatewayError::Config(format!("LISTEN_ADDR: {e}")))?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost:5432/summoner_gateway".to_string());

        let database_max_connections = parse_env("DATABASE_MAX_CONNECTIONS", 10);
        let database_min_connections = parse_env("DATABASE_MIN_CONNECTIONS", 2);
        let database_connect_timeout_secs = parse_env("DATABASE_CONNECT_TIMEOUT_SECS", 5);
        let persistence_enabled = parse_env_bool("PERSISTENCE_ENABLED", true);

        let riot_api_key = std::env::var("RIOT_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GatewayError::Config("RIOT_API_KEY is not set".to_string()))?;
        let riot_api_base_url =
            std::env::var("RIOT_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let upstream_timeout = Duration::from_secs(parse_env("UPSTREAM_TIMEOUT_SECS", 10));

        let defaults = MatchWindow::default();
        let match_window = MatchWindow {
            start: parse_env("MATCH_START", defaults.start),
            count: parse_env("MATCH_COUNT", defaults.count),
        };

        let sweep_enabled = parse_env_bool("SWEEP_ENABLED", true);
        let sweep_defaults = SweepPolicy::default();
        let sweep_policy = SweepPolicy {
            match_retention: parse_env_days(
                "SWEEP_MATCH_RETENTION_DAYS",
                sweep_defaults.match_retention,
            ),
            record_retention: parse_env_days(
                "SWEEP_RECORD_RETENTION_DAYS",
                sweep_defaults.record_retention,
            ),
            run_at: parse_env_time("SWEEP_RUN_AT", sweep_defaults.run_at),
        };

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            database_url,
            database_max_connections,
            database_min_connections,
            database_connect_timeout_secs,
            persistence_enabled,
            riot_api_key,
            riot_api_base_url,
            upstream_timeout,
            match_window,
            sweep_enabled,
            sweep_policy,
            log_format,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    parse_bool(std::env::var(key).ok().as_deref()).unwrap_or(default)
}

fn parse_bool(value: Option<&str>) -> Option<bool> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("true") | Some("1") => Some(true),
        Some("false") | Some("0") => Some(false),
        _ => None,
    }
}

/// Whole days; zero or negative values keep the default.
fn parse_env_days(key: &str, default: TimeDelta) -> TimeDelta {
    match parse_env::<i64>(key, 0) {
        days if days > 0 => TimeDelta::try_days(days).unwrap_or(default),
        _ => default,
    }
}

/// `HH:MM` in UTC.
fn parse_env_time(key: &str, default: NaiveTime) -> NaiveTime {
    std::env::var(key)
        .ok()
        .and_then(|v| NaiveTime::parse_from_str(v.trim(), "%H:%M").ok())
        .unwrap_or(default)
}
