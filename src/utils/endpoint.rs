//! Upstream endpoint resolution.
//!
//! The Potter API base URL is configured with or without a trailing slash;
//! both resolve to the same collection URL.

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Joins a collection path onto the API base URL.
///
/// Query and fragment on the base are dropped. The base path is treated as a
/// directory, so `https://host/v1` and `https://host/v1/` both resolve
/// `houses` to `https://host/v1/houses`.
///
/// # Errors
///
/// Returns [`EndpointError::InvalidFormat`] for malformed URLs.
/// Returns [`EndpointError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn resolve_endpoint(base: &str, path: &str) -> Result<Url, EndpointError> {
    let mut url = Url::parse(base).map_err(|e| EndpointError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(EndpointError::UnsupportedProtocol),
    }

    url.set_query(None);
    url.set_fragment(None);

    if !url.path().ends_with('/') {
        let dir = format!("{}/", url.path());
        url.set_path(&dir);
    }

    url.join(path.trim_start_matches('/'))
        .map_err(|e| EndpointError::InvalidFormat(e.to_string()))
}
