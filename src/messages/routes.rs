// src/messages/routes.rs

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers;

pub fn messages_routes() -> Router {
    Router::new()
        .route("/api/contact", post(handlers::submit_message))
        .route("/api/admin/messages", get(handlers::get_messages))
        .route("/api/admin/messages/:id", delete(handlers::delete_message))
        .route("/api/admin/messages/:id/read", put(handlers::set_read_flag))
}
