//! Handler for character validation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::character::{CharacterPayload, is_uuid};
use crate::error::{AppError, field_errors};
use crate::state::AppState;

/// Validates a character without storing it.
///
/// # Endpoint
///
/// `POST /api/characters/validate`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Harry Potter",
///   "role": "student",
///   "school": "Hogwarts School of Witchcraft and Wizardry",
///   "house": "1760529f-6d51-4cb1-bcb1-25087fce5bde",
///   "patronus": "stag"
/// }
/// ```
///
/// # Response Codes
///
/// - **204 No Content**: All rules pass
/// - **4xx**: The body is not a JSON object of strings (JSON:API body, status from the rejection)
/// - **422 Unprocessable Entity**: Field rules failed, or the house does not exist
/// - **503 Service Unavailable**: The Potter API could not be consulted
///
/// Every field is checked and all failures are reported together. The Potter
/// API is only called for a well-formed house id.
pub async fn validate_character_handler(
    State(state): State<AppState>,
    payload: Result<Json<CharacterPayload>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload?;

    let mut errors = match payload.validate() {
        Ok(()) => Vec::new(),
        Err(e) => field_errors(&e),
    };

    if is_uuid(&payload.house) {
        match state.house_rule.check("house", &payload.house).await {
            Ok(()) => {}
            Err(AppError::Validation { errors: house }) => errors.extend(house),
            Err(e) => return Err(e),
        }
    }

    if errors.is_empty() {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::validation(errors))
    }
}
