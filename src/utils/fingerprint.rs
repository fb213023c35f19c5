//! Cache key derivation for upstream requests.

use sha2::{Digest, Sha256};

/// Derives the cache key for a request.
///
/// The key is the lowercase hex SHA-256 of `"{METHOD}.{endpoint}"`. The
/// method is upper-cased first so `get` and `GET` share an entry.
///
/// # Examples
///
/// ```
/// use potter_houses::utils::fingerprint::fingerprint;
///
/// let key = fingerprint("GET", "https://api.test/houses");
/// assert_eq!(key.len(), 64);
/// assert_eq!(key, fingerprint("get", "https://api.test/houses"));
/// ```
pub fn fingerprint(method: &str, endpoint: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.to_ascii_uppercase().as_bytes());
    hasher.update(b".");
    hasher.update(endpoint.as_bytes());
    hex::encode(hasher.finalize())
}
