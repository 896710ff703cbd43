use crate::Data;
use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::sync::Arc;

pub const SERVICE_NAME: &str = "Reminder API";

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    service: &'static str,
    version: String,
    environment: String,
    timestamp: String,
}

pub async fn service_info(State(data): State<Arc<Data>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: SERVICE_NAME,
        version: data.app_version.clone(),
        environment: data.environment.clone(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
    })
}
