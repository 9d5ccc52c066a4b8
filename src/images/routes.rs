// src/images/routes.rs

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use super::handlers;

/// Request-body cap for the upload endpoint. Axum's 2 MB default sits below
/// the per-file byte ceilings, so without this the framework would reject
/// uploads before the guard could. Sized for a batch of several
/// ceiling-sized files plus multipart framing; per-file limits are enforced
/// by the guard.
pub const MAX_REQUEST_BYTES: usize = 32 * 1024 * 1024;

pub fn images_routes() -> Router {
    Router::new()
        .route("/api/admin/images", post(handlers::normalize_images))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
}
