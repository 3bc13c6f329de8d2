//! GET / -- liveness probe.

use axum::Json;
use serde_json::{Value, json};

pub async fn root() -> Json<Value> {
    Json(json!({ "status": "JusticeAI Local Backend is running" }))
}
