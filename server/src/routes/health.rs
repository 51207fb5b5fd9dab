use axum::Json;
use axum::response::IntoResponse;
use serde_json::json;

/// Liveness check.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "SEO Roaster is alive and roasting!",
    }))
}
