//! Read-through cached membership check against the remote house set.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::entities::HouseSet;
use crate::domain::ports::{HouseSource, RemoteResponse, TransportError};
use crate::infrastructure::cache::{CacheError, CacheService};
use crate::utils::fingerprint::fingerprint;

/// Why the upstream could not be relied on for an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnavailableCause {
    /// The upstream answered with a status of 500 or above.
    ServerError(u16),
    /// Every attempt failed before a status line was received.
    TransportExhausted { attempts: u32 },
    /// A 2xx body that is not a `{"houses": [...]}` envelope.
    MalformedResponse,
}

impl fmt::Display for UnavailableCause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ServerError(status) => write!(f, "upstream returned {}", status),
            Self::TransportExhausted { attempts } => {
                write!(f, "upstream unreachable after {} attempt(s)", attempts)
            }
            Self::MalformedResponse => write!(f, "upstream returned a malformed body"),
        }
    }
}

/// The only error a lookup can produce.
///
/// Callers must surface it as a retryable failure (HTTP 503), never as
/// "house not found".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("House service unavailable: {0}")]
    ServiceUnavailable(UnavailableCause),
}

impl LookupError {
    pub fn cause(&self) -> &UnavailableCause {
        match self {
            Self::ServiceUnavailable(cause) => cause,
        }
    }
}

/// Answers "does this house id exist upstream?" with as few calls as possible.
///
/// # Flow
///
/// 1. With caching on, look up the request fingerprint; a live entry is
///    parsed and tested without touching the network.
/// 2. Otherwise fetch. A 2xx body is parsed, cached (when caching is on) and
///    tested. A status of 500 or more, transport exhaustion or an unparseable
///    2xx body become [`LookupError::ServiceUnavailable`]. Any other status is
///    treated as "not found".
///
/// Concurrent misses for the same fingerprint each call the upstream.
pub struct HouseLookupService {
    source: Arc<dyn HouseSource>,
    cache: Arc<dyn CacheService>,
    cache_ttl: Option<Duration>,
}

impl HouseLookupService {
    /// Creates a lookup.
    ///
    /// `cache_ttl` of `None` (or zero) disables the cache path entirely; see
    /// [`crate::infrastructure::potter::ClientConfig::effective_cache_ttl`].
    pub fn new(
        source: Arc<dyn HouseSource>,
        cache: Arc<dyn CacheService>,
        cache_ttl: Option<Duration>,
    ) -> Self {
        Self {
            source,
            cache,
            cache_ttl: cache_ttl.filter(|ttl| !ttl.is_zero()),
        }
    }

    pub fn is_caching(&self) -> bool {
        self.cache_ttl.is_some()
    }

    /// URL of the upstream collection.
    pub fn endpoint(&self) -> String {
        self.source.endpoint()
    }

    pub fn cache(&self) -> &Arc<dyn CacheService> {
        &self.cache
    }

    /// Cache key for the houses collection.
    pub fn cache_key(&self) -> String {
        fingerprint("GET", &self.source.endpoint())
    }

    /// Checks whether `house_id` is one of the upstream house ids.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ServiceUnavailable`] when the upstream failed;
    /// absence is reported as `Ok(false)`.
    pub async fn contains(&self, house_id: &str) -> Result<bool, LookupError> {
        let found = self
            .houses()
            .await?
            .is_some_and(|houses| houses.contains(house_id));

        debug!(house_id, found, "House lookup");
        Ok(found)
    }

    /// Resolves the house collection through the cache.
    ///
    /// Returns `Ok(None)` when the upstream answered with a non-2xx status
    /// below 500, which lookups treat as an empty set.
    ///
    /// # Errors
    ///
    /// See [`Self::contains`].
    pub async fn houses(&self) -> Result<Option<HouseSet>, LookupError> {
        let Some(ttl) = self.cache_ttl else {
            return self.fetch().await.map(|fetched| fetched.map(|(set, _)| set));
        };

        let key = self.cache_key();

        if let Some(houses) = self.read_cache(&key).await {
            return Ok(Some(houses));
        }

        let Some((houses, response)) = self.fetch().await? else {
            return Ok(None);
        };

        match self.cache.set(&key, &response.body, ttl).await {
            Ok(()) => debug!(key = %key, ttl_secs = ttl.as_secs(), "Cache SET"),
            Err(e) => warn!(key = %key, error = %e, "Cache SET failed"),
        }

        Ok(Some(houses))
    }

    /// Drops the cached collection so the next lookup refetches.
    pub async fn forget(&self) -> Result<(), CacheError> {
        self.cache.invalidate(&self.cache_key()).await
    }

    async fn read_cache(&self, key: &str) -> Option<HouseSet> {
        match self.cache.get(key).await {
            Ok(Some(body)) => match HouseSet::from_json(&body) {
                Ok(houses) => {
                    debug!(key, "Cache HIT");
                    Some(houses)
                }
                Err(e) => {
                    warn!(key, error = %e, "Discarding unreadable cache entry");
                    if let Err(e) = self.cache.invalidate(key).await {
                        warn!(key, error = %e, "Cache invalidate failed");
                    }
                    None
                }
            },
            Ok(None) => {
                debug!(key, "Cache MISS");
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Cache GET failed, treating as miss");
                None
            }
        }
    }

    /// Fetches and classifies one upstream answer.
    async fn fetch(&self) -> Result<Option<(HouseSet, RemoteResponse)>, LookupError> {
        let response = self.source.fetch_houses().await.map_err(|e| {
            error!(error = %e, "Potter API unreachable");
            let TransportError::Exhausted { attempts, .. } = e;
            LookupError::ServiceUnavailable(UnavailableCause::TransportExhausted { attempts })
        })?;

        if response.is_success() {
            return match response.houses() {
                Ok(houses) => Ok(Some((houses, response))),
                Err(e) => {
                    error!(status = response.status, error = %e, "Potter API returned a malformed body");
                    Err(LookupError::ServiceUnavailable(
                        UnavailableCause::MalformedResponse,
                    ))
                }
            };
        }

        if response.is_server_error() {
            error!(status = response.status, "Potter API server error");
            return Err(LookupError::ServiceUnavailable(
                UnavailableCause::ServerError(response.status),
            ));
        }

        warn!(
            status = response.status,
            "Potter API returned a non-success status, treating as not found"
        );
        Ok(None)
    }
}
