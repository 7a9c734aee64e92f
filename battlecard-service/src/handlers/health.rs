use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "battlecard-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe. Reports 503 while the completion client is missing.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match &state.generator {
        Some(generator) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "model": generator.model()
            })),
        ),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "error": "Completion client not initialized"
            })),
        ),
    }
}
