//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{HouseLookupService, HouseRule};

#[derive(Clone)]
pub struct AppState {
    pub house_lookup: Arc<HouseLookupService>,
    pub house_rule: HouseRule,
}

impl AppState {
    pub fn new(house_lookup: Arc<HouseLookupService>) -> Self {
        Self {
            house_rule: HouseRule::new(house_lookup.clone()),
            house_lookup,
        }
    }
}
