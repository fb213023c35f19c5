//! Cache service trait and error types.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Key/value store for raw upstream response bodies.
///
/// Keys are request fingerprints (see [`crate::utils::fingerprint`]). Get and
/// set must be atomic per key; nothing here spans multiple keys.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed store with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process store with passive expiry
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the stored body if present and not expired.
    ///
    /// # Errors
    ///
    /// Backends that cannot reach their store may return an error; callers
    /// treat it as a miss.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a body under `key` for `ttl`.
    ///
    /// # Errors
    ///
    /// Callers log and ignore write failures.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Removes an entry. Missing keys are not an error.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}
