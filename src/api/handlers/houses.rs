//! Handler for single-house existence checks.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::character::{HOUSE_UUID_MESSAGE, HouseCheckResponse, is_uuid};
use crate::error::AppError;
use crate::state::AppState;

/// Checks that a house exists, the way the character listing filter does.
///
/// # Endpoint
///
/// `GET /api/houses/{house}`
///
/// # Response Codes
///
/// - **200 OK**: `{"id": "...", "exists": true}`
/// - **422 Unprocessable Entity**: Malformed id, or the house does not exist
/// - **503 Service Unavailable**: The Potter API could not be consulted
pub async fn house_check_handler(
    State(state): State<AppState>,
    Path(house): Path<String>,
) -> Result<Json<HouseCheckResponse>, AppError> {
    if !is_uuid(&house) {
        return Err(AppError::invalid_field("house", HOUSE_UUID_MESSAGE));
    }

    state.house_rule.check("house", &house).await?;

    Ok(Json(HouseCheckResponse {
        id: house,
        exists: true,
    }))
}
