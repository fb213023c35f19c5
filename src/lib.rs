//! # Potter Houses
//!
//! Character validation service whose `house` field is checked against the
//! Potter API, with read-through caching, retries and failure classification.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - House entities and the upstream port
//! - **Application Layer** ([`application`]) - Cached lookup and the `house` rule
//! - **Infrastructure Layer** ([`infrastructure`]) - Potter API client and cache stores
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Lookup flow
//!
//! ```text
//! validator → HouseLookupService::contains(id)
//!     ├─ cache hit  → membership test
//!     └─ cache miss → PotterApiClient::fetch_houses() → classify → cache (2xx) → membership test
//! ```
//!
//! An upstream status of 500 or more, transport exhaustion, or an unreadable
//! 2xx body is a [`application::services::LookupError`] and reaches clients
//! as `503`; it is never reported as a missing house.
//!
//! ## Quick Start
//!
//! ```bash
//! export POTTER_API_URL="https://www.potterapi.com/v1/"
//! export POTTER_API_SECRET="..."
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

