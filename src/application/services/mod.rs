//! Business logic services for the application layer.

pub mod house_lookup;
pub mod house_rule;

pub use house_lookup::{HouseLookupService, LookupError, UnavailableCause};
pub use house_rule::{HOUSE_NOT_FOUND_MESSAGE, HouseRule};
