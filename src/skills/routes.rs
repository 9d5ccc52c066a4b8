// src/skills/routes.rs

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers;

pub fn skills_routes() -> Router {
    Router::new()
        .route("/api/skills", get(handlers::get_skills))
        .route("/api/admin/skills", post(handlers::create_skill))
        .route(
            "/api/admin/skills/:id",
            put(handlers::update_skill).delete(handlers::delete_skill),
        )
}
