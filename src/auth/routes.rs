// src/auth/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login_handler))
        .route("/api/auth/me", get(handlers::me_handler))
        .route("/api/auth/logout", post(handlers::logout_handler))
}
