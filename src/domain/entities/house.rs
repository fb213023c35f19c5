//! House entity and the collection returned by one upstream fetch.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A house from the Potter API.
///
/// Only `id` is interpreted. Every other field the upstream sends is kept in
/// `extra` so it can be passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An ordered collection of houses as returned by a single fetch.
///
/// The upstream is trusted: duplicates are kept and order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseSet {
    pub houses: Vec<House>,
}

impl HouseSet {
    /// Parses the `{"houses": [...]}` envelope sent by the upstream.
    ///
    /// # Errors
    ///
    /// Fails if the body is not JSON, lacks the `houses` array, or any entry
    /// has no string `id`.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Exact, case-sensitive membership test on `House::id`.
    pub fn contains(&self, house_id: &str) -> bool {
        self.houses.iter().any(|house| house.id == house_id)
    }

    pub fn len(&self) -> usize {
        self.houses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.houses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &House> {
        self.houses.iter()
    }
}
