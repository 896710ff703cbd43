use crate::Data;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

mod health;
mod service_info;

pub fn commands() -> Router<Arc<Data>> {
    Router::new()
        .route("/", get(service_info::service_info))
        .route("/health", get(health::health))
}
