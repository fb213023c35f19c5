//! Domain layer containing the house data model and the upstream port.
//!
//! Nothing in here knows about reqwest, Redis or axum. The infrastructure
//! layer implements [`ports::HouseSource`]; the application layer consumes it.
//!
//! # Architecture
//!
//! - [`entities`] - House records as returned by the Potter API
//! - [`ports`] - The trait every house source must implement, plus its
//!   response and error types

pub mod entities;
pub mod ports;
