//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Potter API
//!
//! ```bash
//! export POTTER_API_URL="https://www.potterapi.com/v1/"
//! export POTTER_API_SECRET="$2a$10$..."
//! export POTTER_API_RETRY_COUNT="2"          # default: 0
//! export POTTER_API_CACHE_LIFESPAN="1800"    # seconds, default: 1800, 0 disables caching
//! ```
//!
//! ## Cache store
//!
//! Either a full URL or individual components:
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! # or
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! Without Redis, responses are cached in process memory.
//!
//! ## Required Variables
//!
//! - `POTTER_API_URL`
//! - `POTTER_API_SECRET`
//!
//! ## Optional Variables
//!
//! - `POTTER_API_RETRY_THROTTLE_MS` - Delay between attempts (default: 100)
//! - `POTTER_API_TIMEOUT_SECS` - Per-attempt timeout (default: 5)
//! - `POTTER_API_FROM_CACHE` - Consult the cache at all (default: `true`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::potter::{ClientConfig, HOUSES_PATH};
use crate::utils::endpoint::resolve_endpoint;

/// Upper bound on `POTTER_API_RETRY_COUNT`.
pub const MAX_RETRY_COUNT: u32 = 10;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub redis_url: Option<String>,

    // ── Potter API ──────────────────────────────────────────────────────────
    pub potter_api_url: String,
    /// Sent as the `apikey` header. Never logged.
    pub potter_api_secret: String,
    /// Retries after the first attempt (`POTTER_API_RETRY_COUNT`, default: 0).
    pub retry_count: u32,
    /// Fixed delay between attempts in milliseconds
    /// (`POTTER_API_RETRY_THROTTLE_MS`, default: 100).
    pub retry_throttle_ms: u64,
    /// Per-attempt timeout in seconds (`POTTER_API_TIMEOUT_SECS`, default: 5).
    pub timeout_secs: u64,
    /// Cache TTL in seconds (`POTTER_API_CACHE_LIFESPAN`, default: 1800).
    /// Zero disables caching.
    pub cache_lifespan_secs: u64,
    /// `POTTER_API_FROM_CACHE`, default: true.
    pub from_cache: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `POTTER_API_URL` or `POTTER_API_SECRET` is missing.
    pub fn from_env() -> Result<Self> {
        let potter_api_url = env::var("POTTER_API_URL").context("POTTER_API_URL must be set")?;
        let potter_api_secret =
            env::var("POTTER_API_SECRET").context("POTTER_API_SECRET must be set")?;

        let redis_url = Self::load_redis_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let from_cache = env::var("POTTER_API_FROM_CACHE")
            .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
            .unwrap_or(true);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            redis_url,
            potter_api_url,
            potter_api_secret,
            retry_count: parse_or("POTTER_API_RETRY_COUNT", 0),
            retry_throttle_ms: parse_or("POTTER_API_RETRY_THROTTLE_MS", 100),
            timeout_secs: parse_or("POTTER_API_TIMEOUT_SECS", 5),
            cache_lifespan_secs: parse_or("POTTER_API_CACHE_LIFESPAN", 1800),
            from_cache,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty());
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        Some(match password {
            Some(pwd) => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            None => format!("redis://{}:{}/{}", host, port, db),
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `POTTER_API_URL` is not an HTTP(S) URL
    /// - `POTTER_API_SECRET` is empty
    /// - `POTTER_API_TIMEOUT_SECS` is 0
    /// - `POTTER_API_RETRY_COUNT` exceeds [`MAX_RETRY_COUNT`]
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - the Redis URL has the wrong scheme
    pub fn validate(&self) -> Result<()> {
        resolve_endpoint(&self.potter_api_url, HOUSES_PATH)
            .with_context(|| format!("POTTER_API_URL is invalid: '{}'", self.potter_api_url))?;

        if self.potter_api_secret.is_empty() {
            anyhow::bail!("POTTER_API_SECRET must not be empty");
        }

        if self.timeout_secs == 0 {
            anyhow::bail!("POTTER_API_TIMEOUT_SECS must be greater than 0");
        }

        if self.retry_count > MAX_RETRY_COUNT {
            anyhow::bail!(
                "POTTER_API_RETRY_COUNT must be at most {}, got {}",
                MAX_RETRY_COUNT,
                self.retry_count
            );
        }

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

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(redis_url)
            );
        }

        Ok(())
    }

    /// Returns whether upstream responses are cached at all.
    pub fn is_cache_enabled(&self) -> bool {
        self.from_cache && self.cache_lifespan_secs > 0
    }

    /// Settings for the Potter API client and lookup.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.potter_api_url, &self.potter_api_secret)
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_retry(
                self.retry_count,
                Duration::from_millis(self.retry_throttle_ms),
            )
            .with_cache(
                self.from_cache,
                Duration::from_secs(self.cache_lifespan_secs),
            )
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Potter API: {}", self.potter_api_url);
        tracing::info!(
            "  Retries: {} (every {}ms), timeout: {}s, worst case: {:?}",
            self.retry_count,
            self.retry_throttle_ms,
            self.timeout_secs,
            self.client_config().worst_case_latency()
        );

        if self.is_cache_enabled() {
            tracing::info!("  Cache lifespan: {}s", self.cache_lifespan_secs);
        } else {
            tracing::info!("  Cache: disabled");
        }

        if let Some(ref redis_url) = self.redis_url {
            tracing::info!("  Redis: {}", mask_connection_string(redis_url));
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

fn parse_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Masks the password in connection strings for logging.
///
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
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
