use axum::Json;
use serde_json::{Value, json};

/// GET /health
///
/// Liveness probe; does not touch GitHub or the LLM.
pub async fn health_route() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
