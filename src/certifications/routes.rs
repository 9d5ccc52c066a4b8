// src/certifications/routes.rs

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers;

pub fn certifications_routes() -> Router {
    Router::new()
        .route("/api/certifications", get(handlers::get_certifications))
        .route(
            "/api/admin/certifications",
            post(handlers::create_certification),
        )
        .route(
            "/api/admin/certifications/:id",
            put(handlers::update_certification).delete(handlers::delete_certification),
        )
}
