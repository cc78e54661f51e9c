//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::infrastructure::cache::CacheState;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Database reachable (cache may be disabled; the service is fail-open)
/// - **503 Service Unavailable**: Database unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok" },
///     "cache": { "status": "ok", "message": "Redis connected" }
///   }
/// }
/// ```
///
/// `status` is `degraded` when the cache is configured but disabled.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_database(&state).await;
    let cache = check_cache(&state).await;

    let db_ok = database.is_ok();
    let status = match (db_ok, cache.status) {
        (false, _) => "unhealthy",
        (true, "disabled") => "degraded",
        (true, _) => "healthy",
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { database, cache },
    };

    if db_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.post_service.check_store().await {
        Ok(()) => CheckStatus::new("ok"),
        Err(e) => CheckStatus::new("error").with_message(format!("Database error: {}", e)),
    }
}

/// Reports cache state; PINGs only while the cache is healthy.
async fn check_cache(state: &AppState) -> CheckStatus {
    if !state.cache.is_configured() {
        return CheckStatus::new("not_configured");
    }

    if state.cache.state() == CacheState::Healthy && state.cache.probe().await {
        CheckStatus::new("ok").with_message("Redis connected")
    } else {
        CheckStatus::new("disabled")
            .with_message("Cache disabled after an error; serving from database")
    }
}
