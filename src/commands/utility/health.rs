use crate::Data;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

pub async fn health(State(data): State<Arc<Data>>) -> (StatusCode, Json<Value>) {
    match data.repository.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "healthy" }))),
        Err(err) => {
            tracing::warn!("health check failed: {err}");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "unhealthy" })))
        }
    }
}
