use crate::Data;
use axum::Router;
use std::sync::Arc;

mod reminders;
mod util;
mod utility;

pub fn router(data: Arc<Data>) -> Router {
    Router::new()
        .merge(reminders::commands())
        .merge(utility::commands())
        .with_state(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminders::repository::tests::memory_repository;
    use crate::reminders::{ReminderRepository, SqliteReminderRepository};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app() -> (Router, SqliteReminderRepository) {
        let repo = memory_repository().await;
        let data = Arc::new(Data {
            repository: Arc::new(repo.clone()),
            app_version: "1.0".into(),
            environment: "test".into(),
        });
        (router(data), repo)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post_add(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/add")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn add_then_list() {
        let (app, _repo) = app().await;
        let (status, body) =
            send(&app, post_add(r#"{"message":"Call mom","remind_time":"2030-01-01 09:00"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Reminder added successfully");
        let id = body["id"].as_i64().unwrap();

        let (status, body) = send(&app, get("/reminders")).await;
        assert_eq!(status, StatusCode::OK);
        let listed = &body.as_array().unwrap()[0];
        assert_eq!(listed["id"], id);
        assert_eq!(listed["message"], "Call mom");
        assert_eq!(listed["remind_time"], "2030-01-01 09:00");
        assert_eq!(listed["triggered"], false);
    }

    #[tokio::test]
    async fn add_rejects_bad_requests() {
        let (app, repo) = app().await;
        let cases = [
            ("not json", "Invalid JSON"),
            ("{}", "Invalid JSON"),
            ("[]", "Invalid JSON"),
            ("null", "Invalid JSON"),
            (r#"{"message":"Call mom"}"#, "Missing required fields"),
            (r#"{"message":"","remind_time":"2030-01-01 09:00"}"#, "Missing required fields"),
            (r#"{"message":"   ","remind_time":"2030-01-01 09:00"}"#, "Missing required fields"),
            (r#"{"message":5,"remind_time":"2030-01-01 09:00"}"#, "Missing required fields"),
            (r#"{"message":"Call mom","remind_time":"2024-13-40"}"#, "Invalid datetime format. Use YYYY-MM-DD HH:MM"),
            (r#"{"message":"Call mom","remind_time":"notatime"}"#, "Invalid datetime format. Use YYYY-MM-DD HH:MM"),
        ];
        for (body, error) in cases {
            let (status, reply) = send(&app, post_add(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            assert_eq!(reply, json!({ "error": error }), "{body}");
        }
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_a_server_error() {
        let (app, repo) = app().await;
        repo.pool().close().await;

        let (status, body) =
            send(&app, post_add(r#"{"message":"Call mom","remind_time":"2030-01-01 09:00"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());

        let (status, _) = send(&app, get("/reminders")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
    }

    #[tokio::test]
    async fn service_info_and_health() {
        let (app, _repo) = app().await;
        let (status, body) = send(&app, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "Reminder API");
        assert_eq!(body["version"], "1.0");
        assert_eq!(body["environment"], "test");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));

        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "status": "healthy" }));
    }
}
