use crate::Data;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

mod add;
mod reminder_list;

pub fn commands() -> Router<Arc<Data>> {
    Router::new()
        .route("/add", post(add::add))
        .route("/reminders", get(reminder_list::reminder_list))
}
