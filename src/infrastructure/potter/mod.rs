//! Potter API client.
//!
//! [`PotterApiClient`] implements [`crate::domain::ports::HouseSource`] on top
//! of reqwest: `apikey` header on every attempt, a per-attempt timeout and a
//! fixed-delay retry schedule from [`retry`].

mod client;
mod config;
pub mod retry;

pub use client::{ClientBuildError, HOUSES_PATH, PotterApiClient};
pub use config::{ClientConfig, DEFAULT_CACHE_TTL, DEFAULT_RETRY_THROTTLE, DEFAULT_TIMEOUT};
