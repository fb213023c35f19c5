//! API route configuration.

use crate::api::handlers::{house_check_handler, validate_character_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /characters/validate` - Validate a character payload, house included
/// - `GET  /houses/{house}`      - Check that a house exists upstream
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/characters/validate", post(validate_character_handler))
        .route("/houses/{house}", get(house_check_handler))
}
