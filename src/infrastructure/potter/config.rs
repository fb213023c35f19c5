//! Client configuration resolved once at construction.

use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_RETRY_THROTTLE: Duration = Duration::from_millis(100);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(1800);

/// Immutable settings for [`super::PotterApiClient`] and the lookup built on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL; the houses path is appended to it.
    pub base_url: String,
    /// Value of the `apikey` header.
    pub secret: String,
    /// Applied to every attempt separately.
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub retry_amount: u32,
    /// Fixed delay between attempts.
    pub retry_throttle: Duration,
    pub cache_ttl: Duration,
    pub cache_enabled: bool,
}

impl ClientConfig {
    /// Creates a configuration with default timeout, no retries and a 30 minute cache.
    pub fn new(base_url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            secret: secret.into(),
            timeout: DEFAULT_TIMEOUT,
            retry_amount: 0,
            retry_throttle: DEFAULT_RETRY_THROTTLE,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_enabled: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry_amount: u32, retry_throttle: Duration) -> Self {
        self.retry_amount = retry_amount;
        self.retry_throttle = retry_throttle;
        self
    }

    pub fn with_cache(mut self, enabled: bool, ttl: Duration) -> Self {
        self.cache_enabled = enabled;
        self.cache_ttl = ttl;
        self
    }

    /// TTL to cache responses with, or `None` when caching is off.
    ///
    /// A zero TTL disables caching even if the flag is set.
    pub fn effective_cache_ttl(&self) -> Option<Duration> {
        (self.cache_enabled && !self.cache_ttl.is_zero()).then_some(self.cache_ttl)
    }

    /// Worst-case wall time of one fetch: every attempt times out and every
    /// retry waits the full throttle.
    pub fn worst_case_latency(&self) -> Duration {
        self.timeout * (self.retry_amount + 1) + self.retry_throttle * self.retry_amount
    }
}
