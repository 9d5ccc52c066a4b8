// src/images/handlers.rs
//! Admin image ingestion endpoint
//!
//! Accepts one or more files in a multipart request, runs each through the
//! guard and normalizer as an independent pipeline, and returns the encoded
//! data URLs for inline storage in document fields. Results arrive in
//! completion order, tagged with their source filename, which may differ
//! from selection order for files of uneven size.

use axum::extract::{Extension, Multipart};
use axum::Json;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::guard::{check_upload, GuardConfig};
use super::normalizer::{normalize_or_original, ImagePreset};
use crate::auth::AuthedUser;
use crate::common::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct NormalizedImage {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

struct PendingFile {
    filename: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// POST /api/admin/images - normalize uploaded images (admin only)
pub async fn normalize_images(
    Extension(_state_lock): Extension<Arc<RwLock<AppState>>>,
    authed: AuthedUser,
    mut multipart: Multipart,
) -> Result<Json<Vec<NormalizedImage>>, ApiError> {
    if !authed.is_admin {
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    let mut preset: Option<ImagePreset> = None;
    let mut files: Vec<PendingFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::BadRequest("Invalid multipart request".to_string()))?
    {
        match field.name() {
            Some("preset") => {
                let name = field.text().await.unwrap_or_default();
                preset = ImagePreset::from_name(&name);
                if preset.is_none() {
                    return Err(ApiError::BadRequest(format!(
                        "Unknown image preset '{}'",
                        name
                    )));
                }
            }
            Some("image") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| ApiError::BadRequest("Failed to read file data".to_string()))?
                    .to_vec();
                files.push(PendingFile {
                    filename,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    let preset = preset.ok_or_else(|| ApiError::BadRequest("No preset provided".to_string()))?;

    if files.is_empty() {
        return Err(ApiError::BadRequest("No image provided".to_string()));
    }

    info!(
        admin_id = %authed.id,
        preset = ?preset,
        file_count = files.len(),
        "Normalizing uploaded images"
    );

    // One independent pipeline per file; results are appended as each
    // completes, so output order follows completion order
    let mut pipelines: FuturesUnordered<_> = files
        .into_iter()
        .map(|file| {
            tokio::task::spawn_blocking(move || process_file(file, preset))
        })
        .collect();

    let mut results = Vec::new();
    while let Some(joined) = pipelines.next().await {
        let result = joined
            .map_err(|_| ApiError::ProcessingError("Image pipeline task failed".to_string()))?;
        results.push(result);
    }

    Ok(Json(results))
}

fn process_file(file: PendingFile, preset: ImagePreset) -> NormalizedImage {
    let guard = GuardConfig::image(preset.max_bytes());

    if let Err(e) = check_upload(&file.data, file.content_type.as_deref(), &guard) {
        warn!(filename = %file.filename, error = %e, "Upload rejected by guard");
        let reason = match e {
            ApiError::ValidationError(msg) => msg,
            other => other.to_string(),
        };
        return NormalizedImage {
            filename: file.filename,
            data_url: None,
            width: None,
            height: None,
            fallback: false,
            error: Some(reason),
        };
    }

    let encoded = normalize_or_original(&file.data, &preset.options());

    NormalizedImage {
        filename: file.filename,
        data_url: Some(encoded.data_url),
        width: encoded.width,
        height: encoded.height,
        fallback: encoded.fallback,
        error: None,
    }
}
