//! Health check handler.

use axum::Json;
use axum::extract::State;

use authgate_database::connection::health_check;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
///
/// Always answers 200; the body reports whether the database behind the
/// gateway is reachable.
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = health_check(&state.db_pool).await.unwrap_or(false);

    Json(ApiResponse::ok(HealthResponse {
        status: if database { "ok" } else { "degraded" }.to_string(),
        database,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
