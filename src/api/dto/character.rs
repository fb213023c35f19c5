//! DTOs for character validation.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use validator::{Validate, ValidationError};

/// Canonical 8-4-4-4-12 hex UUID, any case.
static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

pub const HOUSE_UUID_MESSAGE: &str = "The house must be a valid UUID.";

/// Character attributes as submitted by clients.
///
/// Missing fields deserialize to empty strings so they are reported by the
/// validator instead of failing JSON extraction.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CharacterPayload {
    #[serde(default)]
    #[validate(custom(function = "required", message = "The name field is required."))]
    #[validate(length(max = 255, message = "The name must not be greater than 255 characters."))]
    pub name: String,

    #[serde(default)]
    #[validate(custom(function = "required", message = "The role field is required."))]
    #[validate(length(max = 255, message = "The role must not be greater than 255 characters."))]
    pub role: String,

    #[serde(default)]
    #[validate(custom(function = "required", message = "The school field is required."))]
    #[validate(length(max = 255, message = "The school must not be greater than 255 characters."))]
    pub school: String,

    /// Potter API house id; existence is checked separately.
    #[serde(default)]
    #[validate(custom(function = "house_uuid"))]
    pub house: String,

    #[serde(default)]
    #[validate(custom(function = "required", message = "The patronus field is required."))]
    #[validate(length(max = 255, message = "The patronus must not be greater than 255 characters."))]
    pub patronus: String,
}

/// Response for a successful house check.
#[derive(Debug, Serialize)]
pub struct HouseCheckResponse {
    pub id: String,
    pub exists: bool,
}

/// Returns true if `value` is a well-formed UUID.
pub fn is_uuid(value: &str) -> bool {
    UUID_REGEX.is_match(value)
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn house_uuid(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required")
            .with_message(Cow::Borrowed("The house field is required.")));
    }
    if !is_uuid(value) {
        return Err(ValidationError::new("uuid").with_message(Cow::Borrowed(HOUSE_UUID_MESSAGE)));
    }
    Ok(())
}
