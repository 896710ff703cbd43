use crate::commands::util::error_reply;
use crate::Data;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;

/// Shows every stored reminder, fired or not
pub async fn reminder_list(State(data): State<Arc<Data>>) -> Response {
    match data.repository.list_all().await {
        Ok(reminders) => Json(reminders).into_response(),
        Err(err) => {
            tracing::error!("failed to list reminders: {err}");
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}
