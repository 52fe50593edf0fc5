//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let storage: std::collections::BTreeMap<String, bool> = state
        .storage
        .health_check_all()
        .await
        .into_iter()
        .map(|(backend, healthy)| (backend.to_string(), healthy))
        .collect();

    let status = if storage.values().all(|healthy| *healthy) {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        active_storage: state.storage.active_backend().to_string(),
        storage,
    }))
}
