//! Port for fetching the remote house collection.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::HouseSet;

/// Outcome of one completed exchange with the upstream.
///
/// A non-2xx status is *not* an error at this level; it is reported through
/// `status` and classified by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: String,
}

impl RemoteResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true for any status of 500 or above.
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    /// Parses the body as a house collection.
    pub fn houses(&self) -> Result<HouseSet, serde_json::Error> {
        HouseSet::from_json(&self.body)
    }
}

/// Raised when no attempt produced a complete HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("GET {endpoint} failed after {attempts} attempt(s): {message}")]
    Exhausted {
        endpoint: String,
        attempts: u32,
        message: String,
    },
}

/// Source of the remote house collection.
///
/// Each call is independent: implementations must not keep per-call state
/// such as a "last status" between invocations.
///
/// # Implementations
///
/// - [`crate::infrastructure::potter::PotterApiClient`] - reqwest-backed client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HouseSource: Send + Sync {
    /// Fully qualified URL of the houses collection.
    fn endpoint(&self) -> String;

    /// Performs the GET, applying timeout and retry.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Exhausted`] when every attempt failed before
    /// a status line was received.
    async fn fetch_houses(&self) -> Result<RemoteResponse, TransportError>;
}
