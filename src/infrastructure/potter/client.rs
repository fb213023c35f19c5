//! reqwest-backed implementation of [`HouseSource`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_retry::RetryIf;
use tracing::{debug, instrument, warn};
use url::Url;

use super::config::ClientConfig;
use super::retry;
use crate::domain::ports::{HouseSource, RemoteResponse, TransportError};
use crate::utils::endpoint::{EndpointError, resolve_endpoint};

/// Collection path appended to the configured base URL.
pub const HOUSES_PATH: &str = "houses";

/// Errors raised while building the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("Invalid POTTER_API_URL: {0}")]
    Endpoint(#[from] EndpointError),

    #[error("POTTER_API_SECRET is not a valid header value")]
    InvalidSecret(#[from] InvalidHeaderValue),

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Why a single attempt did not produce a usable answer.
enum AttemptError {
    /// No status line was received (connect error, timeout, broken body).
    Transport(String),
    /// The upstream answered with a retryable status.
    Status(RemoteResponse),
}

/// Client for `GET {base}/houses`.
///
/// Holds no per-call state; concurrent calls on one instance are independent.
pub struct PotterApiClient {
    http: reqwest::Client,
    endpoint: Url,
    timeout: Duration,
    retry_amount: u32,
    retry_throttle: Duration,
}

impl PotterApiClient {
    /// Builds the client from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Fails if the base URL is not HTTP(S), the secret cannot be sent as a
    /// header, or the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientBuildError> {
        let endpoint = resolve_endpoint(&config.base_url, HOUSES_PATH)?;

        let mut apikey = HeaderValue::from_str(&config.secret)?;
        apikey.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", apikey);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint,
            timeout: config.timeout,
            retry_amount: config.retry_amount,
            retry_throttle: config.retry_throttle,
        })
    }

    async fn attempt(&self, attempt: u32) -> Result<RemoteResponse, AttemptError> {
        let response = match self.http.get(self.endpoint.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                let message = self.describe(&e);
                warn!(attempt, error = %message, "Potter API request failed");
                return Err(AttemptError::Transport(message));
            }
        };

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let message = self.describe(&e);
            warn!(attempt, status = status.as_u16(), error = %message, "Potter API body read failed");
            AttemptError::Transport(message)
        })?;

        let remote = RemoteResponse::new(status.as_u16(), body);

        if retry::is_retryable_status(status) {
            warn!(attempt, status = status.as_u16(), "Potter API returned retryable status");
            return Err(AttemptError::Status(remote));
        }

        debug!(attempt, status = status.as_u16(), "Potter API responded");
        Ok(remote)
    }

    fn describe(&self, e: &reqwest::Error) -> String {
        if e.is_timeout() {
            format!("timed out after {:?}", self.timeout)
        } else {
            e.to_string()
        }
    }
}

#[async_trait]
impl HouseSource for PotterApiClient {
    fn endpoint(&self) -> String {
        self.endpoint.to_string()
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_houses(&self) -> Result<RemoteResponse, TransportError> {
        let attempts = AtomicU32::new(0);
        let last_status: Mutex<Option<RemoteResponse>> = Mutex::new(None);

        let outcome = RetryIf::spawn(
            retry::fixed_delays(self.retry_amount, self.retry_throttle),
            || {
                let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;
                let last_status = &last_status;
                async move {
                    let result = self.attempt(attempt).await;
                    if let Err(AttemptError::Status(response)) = &result {
                        *last_status.lock().await = Some(response.clone());
                    }
                    result
                }
            },
            |_: &AttemptError| true,
        )
        .await;

        let attempts = attempts.load(Ordering::Relaxed);

        match outcome {
            Ok(response) | Err(AttemptError::Status(response)) => Ok(response),
            // An earlier attempt completed an exchange; report its status
            Err(AttemptError::Transport(message)) => match last_status.into_inner() {
                Some(response) => {
                    warn!(
                        attempts,
                        status = response.status,
                        error = %message,
                        "Last attempt failed, returning earlier status"
                    );
                    Ok(response)
                }
                None => Err(TransportError::Exhausted {
                    endpoint: self.endpoint.to_string(),
                    attempts,
                    message,
                }),
            },
        }
    }
}
