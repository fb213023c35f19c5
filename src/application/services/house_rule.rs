//! The `house` validation rule.

use std::sync::Arc;

use super::house_lookup::HouseLookupService;
use crate::error::AppError;

pub const HOUSE_NOT_FOUND_MESSAGE: &str = "The house does not exist.";

/// Validation rule: the submitted house must exist in the Potter API.
///
/// An upstream outage is not the client's fault, so it surfaces as
/// [`AppError::ServiceUnavailable`] rather than a validation failure.
#[derive(Clone)]
pub struct HouseRule {
    lookup: Arc<HouseLookupService>,
}

impl HouseRule {
    pub fn new(lookup: Arc<HouseLookupService>) -> Self {
        Self { lookup }
    }

    /// Checks `house` under the field name `source`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the house does not exist.
    /// Returns [`AppError::ServiceUnavailable`] if the upstream failed.
    pub async fn check(&self, source: &str, house: &str) -> Result<(), AppError> {
        if self.lookup.contains(house).await? {
            Ok(())
        } else {
            Err(AppError::invalid_field(source, HOUSE_NOT_FOUND_MESSAGE))
        }
    }
}
