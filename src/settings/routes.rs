// src/settings/routes.rs

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers;

pub fn settings_routes() -> Router {
    Router::new()
        .route("/api/profile", get(handlers::get_profile))
        .route("/api/admin/profile", put(handlers::update_profile))
}
