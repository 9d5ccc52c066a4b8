// src/experiences/routes.rs

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers;

pub fn experiences_routes() -> Router {
    Router::new()
        .route("/api/experiences", get(handlers::get_experiences))
        .route("/api/admin/experiences", post(handlers::create_experience))
        .route(
            "/api/admin/experiences/:id",
            put(handlers::update_experience).delete(handlers::delete_experience),
        )
}
