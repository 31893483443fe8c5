//! Health check handler.

use axum::extract::State;
use axum::Json;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .is_ok();

    let storage = state
        .storage
        .provider()
        .health_check()
        .await
        .unwrap_or(false);

    let status = if database && storage { "ok" } else { "degraded" };

    Json(HealthResponse {
        status: status.to_string(),
        database,
        storage,
    })
}
