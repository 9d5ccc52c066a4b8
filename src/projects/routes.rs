// src/projects/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

pub fn projects_routes() -> Router {
    Router::new()
        // Public routes
        .route("/api/projects", get(handlers::get_public_projects))
        .route("/api/projects/:id", get(handlers::get_public_project))
        // Admin routes
        .route(
            "/api/admin/projects",
            get(handlers::get_projects).post(handlers::create_project),
        )
        .route(
            "/api/admin/projects/bulk-delete",
            post(handlers::bulk_delete_projects),
        )
        .route(
            "/api/admin/projects/:id",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
}
