use crate::commands::util::error_reply;
use crate::error::ReminderError;
use crate::reminders::NewReminder;
use crate::Data;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Create a reminder
///
/// POST /add {"message": "...", "remind_time": "YYYY-MM-DD HH:MM"}
pub async fn add(
    State(data): State<Arc<Data>>, payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    // an empty object counts as no payload at all
    let payload = match payload {
        Ok(Json(Value::Object(payload))) if !payload.is_empty() => payload,
        _ => return error_reply(StatusCode::BAD_REQUEST, "Invalid JSON"),
    };
    let (Some(message), Some(remind_time)) =
        (text_field(&payload, "message"), text_field(&payload, "remind_time"))
    else {
        return error_reply(StatusCode::BAD_REQUEST, "Missing required fields");
    };

    // the message is known non-blank here, so any rejection is the timestamp
    let reminder = match NewReminder::validate(message, remind_time) {
        Ok(reminder) => reminder,
        Err(ReminderError::Validation(_)) => {
            return error_reply(
                StatusCode::BAD_REQUEST,
                "Invalid datetime format. Use YYYY-MM-DD HH:MM",
            )
        }
        Err(err) => return error_reply(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    };

    match data.repository.insert_new(reminder).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Reminder added successfully", "id": id })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("failed to store reminder: {err}");
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// Blank or non-string values count as missing.
fn text_field<'a>(payload: &'a Map<String, Value>, name: &str) -> Option<&'a str> {
    payload.get(name).and_then(Value::as_str).filter(|v| !v.trim().is_empty())
}
