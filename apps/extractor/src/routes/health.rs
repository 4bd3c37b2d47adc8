use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Confirms the service is up.
pub async fn home_handler() -> Json<Value> {
    Json(json!({
        "message": "Real Estate Extraction API is running!"
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "listing-extractor"
    }))
}
