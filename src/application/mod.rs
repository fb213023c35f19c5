//! Application layer services.
//!
//! This layer sits between the HTTP handlers and the upstream: it owns the
//! caching policy and the translation of upstream outcomes into validation
//! results.
//!
//! # Available Services
//!
//! - [`services::house_lookup::HouseLookupService`] - Cached house membership check
//! - [`services::house_rule::HouseRule`] - The `house` field validation rule

pub mod services;
