//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: The cache backend is down
///
/// # Components Checked
///
/// 1. **Cache**: Backend ping (always ok for the in-memory and no-op stores)
/// 2. **Upstream**: Reports the configured endpoint; no request is made so
///    health probes never spend Potter API quota
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let cache_check = check_cache(&state).await;

    let upstream_check = CheckStatus {
        status: "ok".to_string(),
        message: Some(format!("Endpoint: {}", state.house_lookup.endpoint())),
    };

    let all_healthy = cache_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            cache: cache_check,
            upstream: upstream_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks cache connectivity.
async fn check_cache(state: &AppState) -> CheckStatus {
    let cache = state.house_lookup.cache();
    let caching = if state.house_lookup.is_caching() {
        "enabled"
    } else {
        "disabled"
    };

    if cache.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Backend: {} ({})", cache.backend(), caching)),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some(format!("Backend {} unreachable", cache.backend())),
        }
    }
}
