//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod characters;
pub mod health;
pub mod houses;

pub use characters::validate_character_handler;
pub use health::health_handler;
pub use houses::house_check_handler;
