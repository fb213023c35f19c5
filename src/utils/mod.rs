//! Utility functions shared across layers.
//!
//! - [`endpoint`] - Joining collection paths onto the configured API base URL
//! - [`fingerprint`] - Deterministic cache keys for upstream requests

pub mod endpoint;
pub mod fingerprint;
